use crate::utils::{grounded_extension, Label, LabelSet, LabelType};
use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;

/// An argument of an [`AAFramework`].
pub type Argument<T> = Label<T>;

/// The set of arguments of an [`AAFramework`].
pub type ArgumentSet<T> = LabelSet<T>;

/// An Abstract Argumentation framework as defined in Dung semantics.
///
/// Arguments are referred to by their labels or by their ids in the [`ArgumentSet`].
/// Each attack is stored once, even if it is declared multiple times.
pub struct AAFramework<T>
where
    T: LabelType,
{
    arguments: ArgumentSet<T>,
    attacks: Vec<(usize, usize)>,
    attack_set: HashSet<(usize, usize)>,
    attackers: Vec<Vec<usize>>,
    attacked: Vec<Vec<usize>>,
}

impl<T> Default for AAFramework<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self::new(ArgumentSet::default())
    }
}

/// An attack, represented as a couple of two arguments.
///
/// Attacks are built by [`AAFramework`] objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attack<'a, T>(&'a Argument<T>, &'a Argument<T>)
where
    T: LabelType;

impl<'a, T> Attack<'a, T>
where
    T: LabelType,
{
    /// Returns the attacker.
    pub fn attacker(&self) -> &'a Argument<T> {
        self.0
    }

    /// Returns the attacked argument.
    pub fn attacked(&self) -> &'a Argument<T> {
        self.1
    }
}

impl<T> AAFramework<T>
where
    T: LabelType,
{
    /// Builds an AA framework with no attack.
    ///
    /// # Example
    ///
    /// ```
    /// # use dialabri::aa::{AAFramework, ArgumentSet};
    /// let arguments = ArgumentSet::new_with_labels(&["a", "b", "c"]);
    /// let framework = AAFramework::new(arguments);
    /// assert_eq!(3, framework.n_arguments());
    /// assert_eq!(0, framework.n_attacks());
    /// ```
    pub fn new(arguments: ArgumentSet<T>) -> Self {
        let n = arguments.len();
        AAFramework {
            arguments,
            attacks: vec![],
            attack_set: HashSet::new(),
            attackers: vec![vec![]; n],
            attacked: vec![vec![]; n],
        }
    }

    /// Adds a new attack given the labels of the source and destination arguments.
    ///
    /// If the provided arguments are undefined, an error is returned.
    /// Adding an attack that already exists has no effect.
    ///
    /// # Example
    ///
    /// ```
    /// # use dialabri::aa::{AAFramework, ArgumentSet};
    /// let mut framework = AAFramework::new(ArgumentSet::new_with_labels(&["a", "b"]));
    /// framework.new_attack(&"a", &"b").unwrap();
    /// framework.new_attack(&"a", &"b").unwrap();
    /// assert_eq!(1, framework.n_attacks());
    /// assert!(framework.new_attack(&"a", &"c").is_err());
    /// ```
    pub fn new_attack(&mut self, from: &T, to: &T) -> Result<()> {
        let context = || format!("cannot add an attack from {:?} to {:?}", from, to);
        let attacker_id = self.arguments.get_label(from).with_context(context)?.id();
        let attacked_id = self.arguments.get_label(to).with_context(context)?.id();
        self.new_attack_by_ids(attacker_id, attacked_id)
    }

    /// Adds a new attack given the ids of the source and destination arguments.
    ///
    /// If the provided arguments are undefined, an error is returned.
    /// Adding an attack that already exists has no effect.
    pub fn new_attack_by_ids(&mut self, from: usize, to: usize) -> Result<()> {
        let n_arguments = self.arguments.len();
        if from >= n_arguments || to >= n_arguments {
            return Err(anyhow!(
                "cannot add an attack from identifiers {:?} to {:?}; there are {} arguments",
                from,
                to,
                n_arguments
            ));
        }
        if self.attack_set.insert((from, to)) {
            self.attacks.push((from, to));
            self.attackers[to].push(from);
            self.attacked[from].push(to);
        }
        Ok(())
    }

    /// Returns the argument set of the framework.
    pub fn argument_set(&self) -> &ArgumentSet<T> {
        &self.arguments
    }

    /// Provides an iterator to the attacks, in declaration order.
    pub fn iter_attacks(&self) -> impl Iterator<Item = Attack<'_, T>> + '_ {
        self.attacks
            .iter()
            .map(|(a, b)| self.attack_from_ids(*a, *b))
    }

    /// Provides an iterator to the attacks that have the given argument as attacker.
    pub fn iter_attacks_from(&self, arg: &Argument<T>) -> impl Iterator<Item = Attack<'_, T>> + '_ {
        let from = arg.id();
        self.attacked[from]
            .iter()
            .map(move |to| self.attack_from_ids(from, *to))
    }

    /// Provides an iterator to the attacks that have the given argument as attacked.
    ///
    /// # Example
    ///
    /// ```
    /// # use dialabri::aa::{AAFramework, ArgumentSet};
    /// let mut framework = AAFramework::new(ArgumentSet::new_with_labels(&["a", "b", "c"]));
    /// framework.new_attack(&"a", &"c").unwrap();
    /// framework.new_attack(&"b", &"c").unwrap();
    /// let c = framework.argument_set().get_label(&"c").unwrap();
    /// let attackers = framework
    ///     .iter_attacks_to(c)
    ///     .map(|att| *att.attacker().label())
    ///     .collect::<Vec<_>>();
    /// assert_eq!(vec!["a", "b"], attackers);
    /// ```
    pub fn iter_attacks_to(&self, arg: &Argument<T>) -> impl Iterator<Item = Attack<'_, T>> + '_ {
        let to = arg.id();
        self.attackers[to]
            .iter()
            .map(move |from| self.attack_from_ids(*from, to))
    }

    fn attack_from_ids(&self, from: usize, to: usize) -> Attack<'_, T> {
        Attack(
            self.arguments.get_label_by_id(from),
            self.arguments.get_label_by_id(to),
        )
    }

    /// Returns the ids of the attackers of the argument with the given id, in declaration order.
    pub fn attacker_ids(&self, arg_id: usize) -> &[usize] {
        &self.attackers[arg_id]
    }

    /// Returns the ids of the arguments attacked by the argument with the given id, in declaration order.
    pub fn attacked_ids(&self, arg_id: usize) -> &[usize] {
        &self.attacked[arg_id]
    }

    /// Returns `true` iff the first argument attacks the second one.
    pub fn has_attack(&self, from: &Argument<T>, to: &Argument<T>) -> bool {
        self.has_attack_by_ids(from.id(), to.id())
    }

    /// Returns `true` iff the argument with id `from` attacks the argument with id `to`.
    pub fn has_attack_by_ids(&self, from: usize, to: usize) -> bool {
        self.attack_set.contains(&(from, to))
    }

    /// Returns the number of arguments in this framework.
    pub fn n_arguments(&self) -> usize {
        self.arguments.len()
    }

    /// Returns the number of attacks in this framework.
    pub fn n_attacks(&self) -> usize {
        self.attacks.len()
    }

    /// Computes the grounded extension of this framework.
    ///
    /// The arguments are returned in the order they were found acceptable.
    pub fn grounded_extension(&self) -> Vec<&Argument<T>> {
        grounded_extension(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[test]
    fn test_n_args() {
        let af = AAFramework::new(ArgumentSet::new_with_labels(&labels()));
        assert_eq!(3, af.n_arguments());
    }

    #[test]
    fn test_new_attack_ok() {
        let arg_labels = labels();
        let mut af = AAFramework::new(ArgumentSet::new_with_labels(&arg_labels));
        af.new_attack(&arg_labels[0], &arg_labels[0]).unwrap();
        assert_eq!(1, af.n_attacks());
        assert_eq!(&[0], af.attacker_ids(0));
        assert!(af.has_attack_by_ids(0, 0));
    }

    #[test]
    fn test_new_attack_unknown_label() {
        let arg_labels = labels();
        let mut af = AAFramework::new(ArgumentSet::new_with_labels(&arg_labels));
        af.new_attack(&"d".to_string(), &arg_labels[0]).unwrap_err();
        af.new_attack(&arg_labels[0], &"d".to_string()).unwrap_err();
        assert_eq!(0, af.n_attacks());
    }

    #[test]
    fn test_new_attack_by_ids_unknown_id() {
        let mut af = AAFramework::new(ArgumentSet::new_with_labels(&labels()));
        af.new_attack_by_ids(3, 0).unwrap_err();
        af.new_attack_by_ids(0, 3).unwrap_err();
    }

    #[test]
    fn test_iter_attacks_from_and_to() {
        let mut af = AAFramework::new(ArgumentSet::new_with_labels(&["a", "b", "c"]));
        af.new_attack(&"a", &"b").unwrap();
        af.new_attack(&"a", &"c").unwrap();
        af.new_attack(&"c", &"b").unwrap();
        let a = af.argument_set().get_label(&"a").unwrap();
        let b = af.argument_set().get_label(&"b").unwrap();
        let from_a = af
            .iter_attacks_from(a)
            .map(|att| *att.attacked().label())
            .collect::<Vec<_>>();
        assert_eq!(vec!["b", "c"], from_a);
        let to_b = af
            .iter_attacks_to(b)
            .map(|att| *att.attacker().label())
            .collect::<Vec<_>>();
        assert_eq!(vec!["a", "c"], to_b);
        assert!(af.has_attack(a, b));
        assert!(!af.has_attack(b, a));
    }
}
