use crate::{
    aa::{Argument, ArgumentationModel},
    utils::LabelType,
};
use anyhow::{Context, Result};
use std::io::{Read, Write};

/// The type of callback functions to call when warnings are raised while parsing a model.
///
/// The callbacks receive the line number (starting at 1) and the warning message.
pub type WarningHandler = Box<dyn Fn(usize, String)>;

/// A trait implemented by objects able to read argumentation models.
pub trait InstanceReader<T>
where
    T: LabelType,
{
    /// Reads an [`ArgumentationModel`].
    /// The [LabelType] of the returned models depends on the reader.
    ///
    /// In case warnings are raised, the callback functions registered by [add_warning_handler](Self::add_warning_handler) are triggered.
    ///
    /// # Example
    ///
    /// ```
    /// # use dialabri::aa::ArgumentationModel;
    /// # use dialabri::io::{FactsReader, InstanceReader};
    /// fn read_model_from_str(s: &str) -> ArgumentationModel<String> {
    ///     let reader = FactsReader::default();
    ///     reader.read(&mut s.as_bytes()).expect("invalid model")
    /// }
    /// # read_model_from_str("arg(a).");
    /// ```
    fn read(&self, reader: &mut dyn Read) -> Result<ArgumentationModel<T>>;

    /// Reads an argument from a string.
    fn read_arg_from_str<'a>(
        &self,
        model: &'a ArgumentationModel<T>,
        arg: &str,
    ) -> Result<&'a Argument<T>>;

    /// Adds a callback function to call when warnings are raised while parsing a model.
    fn add_warning_handler(&mut self, h: WarningHandler);
}

pub(crate) fn write_no_dialogue(writer: &mut dyn Write) -> Result<()> {
    let context = "while writing problem has no dialogue";
    writeln!(writer, "NO").context(context)?;
    writer.flush().context(context)
}

pub(crate) fn write_blocks(writer: &mut dyn Write, blocks: &[String]) -> Result<()> {
    if blocks.is_empty() {
        return write_no_dialogue(writer);
    }
    let context = "while writing dialogues";
    writeln!(writer, "YES").context(context)?;
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            writeln!(writer).context(context)?;
        }
        writeln!(writer, "{}", block).context(context)?;
    }
    writer.flush().context(context)
}
