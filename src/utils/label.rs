use anyhow::{anyhow, Result};
use std::{
    collections::HashMap,
    fmt::{Debug, Display},
    hash::Hash,
};

/// The trait for argument, property and framework state labels.
///
/// Any type usable as a map key and displayable may be used as a label.
/// This trait is just a shortcut used to combine these requirements.
///
/// Simple types like [usize], [&str] and [String] implement [LabelType].
pub trait LabelType: Clone + Debug + Display + Eq + Hash {}
impl<T: Clone + Debug + Display + Eq + Hash> LabelType for T {}

/// A labelled object (an argument, a property, a framework state), associated with a unique identifier.
///
/// Labels are built by [`LabelSet`] objects.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Label<T>
where
    T: LabelType,
{
    id: usize,
    label: T,
}

impl<T> Label<T>
where
    T: LabelType,
{
    /// Returns the label.
    pub fn label(&self) -> &T {
        &self.label
    }

    /// Returns the identifier of the label in its set.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl<T> Display for Label<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Handles a set of labels, each one with a unique id.
///
/// Identifiers are given in insertion order, starting at 0.
/// Adding a label that is already present has no effect.
#[derive(Debug)]
pub struct LabelSet<T>
where
    T: LabelType,
{
    labels: Vec<Label<T>>,
    label_to_id: HashMap<T, usize>,
}

impl<T> Default for LabelSet<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            label_to_id: HashMap::new(),
        }
    }
}

impl<T> LabelSet<T>
where
    T: LabelType,
{
    /// Builds a new label set initialized with a set of labels.
    ///
    /// If a label appears multiple times, the first occurrence is the only one that is considered.
    ///
    /// # Example
    ///
    /// ```
    /// # use dialabri::utils::LabelSet;
    /// let labels = LabelSet::new_with_labels(&["a", "b", "a"]);
    /// assert_eq!(2, labels.len());
    /// assert_eq!(1, labels.get_label(&"b").unwrap().id());
    /// ```
    pub fn new_with_labels(labels: &[T]) -> Self {
        let mut label_set = LabelSet {
            labels: Vec::with_capacity(labels.len()),
            label_to_id: HashMap::with_capacity(labels.len()),
        };
        labels.iter().for_each(|l| {
            label_set.new_label(l.clone());
        });
        label_set.labels.shrink_to_fit();
        label_set.label_to_id.shrink_to_fit();
        label_set
    }

    /// Adds a new label to this set and returns its id.
    ///
    /// In the label is already present in the set, nothing is added and the existing id is returned.
    pub fn new_label(&mut self, label: T) -> usize {
        *self.label_to_id.entry(label.clone()).or_insert_with(|| {
            self.labels.push(Label {
                id: self.labels.len(),
                label,
            });
            self.labels.len() - 1
        })
    }

    /// Returns the number of labels in the set.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if and only if the set has no label.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns `true` if and only if the label belongs to this set.
    pub fn contains(&self, label: &T) -> bool {
        self.label_to_id.contains_key(label)
    }

    /// Returns the label object associated to a label.
    ///
    /// In case no such label exists, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// # use dialabri::utils::LabelSet;
    /// let labels = LabelSet::new_with_labels(&["a", "b", "c"]);
    /// assert!(labels.get_label(&"a").is_ok());
    /// assert!(labels.get_label(&"d").is_err());
    /// ```
    pub fn get_label(&self, label: &T) -> Result<&Label<T>> {
        self.label_to_id
            .get(label)
            .map(|i| &self.labels[*i])
            .ok_or_else(|| anyhow!("no such label: {}", label))
    }

    /// Returns the label with the corresponding id.
    ///
    /// # Panics
    ///
    /// Panics if no label has such id.
    pub fn get_label_by_id(&self, id: usize) -> &Label<T> {
        &self.labels[id]
    }

    /// Returns an iterator to the labels, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Label<T>> + '_ {
        self.labels.iter()
    }
}
