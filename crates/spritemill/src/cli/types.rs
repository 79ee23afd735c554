//! CLI enum types shared by the export and build commands.

use clap::ValueEnum;
use spritemill_core::{DataFormat, SheetLayout};

/// Sheet packing layout.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SheetLayoutArg {
    /// Tightly packed frames (default)
    Packed,
    /// One row per frame sequence
    Rows,
}

impl From<SheetLayoutArg> for SheetLayout {
    fn from(value: SheetLayoutArg) -> Self {
        match value {
            SheetLayoutArg::Packed => SheetLayout::Packed,
            SheetLayoutArg::Rows => SheetLayout::Rows,
        }
    }
}

/// Side-car metadata format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DataFormatArg {
    /// Frames keyed by filename (default)
    JsonHash,
    /// Frames as an ordered array
    JsonArray,
}

impl From<DataFormatArg> for DataFormat {
    fn from(value: DataFormatArg) -> Self {
        match value {
            DataFormatArg::JsonHash => DataFormat::JsonHash,
            DataFormatArg::JsonArray => DataFormat::JsonArray,
        }
    }
}
