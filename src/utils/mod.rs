//! Miscellaneous components used in the library.

mod grounded_extension_computer;
pub(crate) use grounded_extension_computer::grounded_extension;

mod label;
pub use label::Label;
pub use label::LabelSet;
pub use label::LabelType;
