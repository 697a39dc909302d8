use super::{warned::Warned, InstanceReader, WarningHandler};
use crate::aa::{Argument, ArgumentationModel, ModelBuilder};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::io::{BufRead, BufReader, Read};

const TERM: &str = r"([^,()\[\]]+)";
const LIST: &str = r"\s*\[([^()\[\]]*)\]\s*";

lazy_static! {
    static ref NAME_PATTERN: Regex = Regex::new(r"^[_[:alpha:]][_[:alpha:]\d]*$").unwrap();
    static ref ARG_PATTERN: Regex = Regex::new(&format!(r"^arg\({}\)$", TERM)).unwrap();
    static ref ATT_PATTERN: Regex = Regex::new(&format!(r"^att\({},{}\)$", TERM, TERM)).unwrap();
    static ref AFSTATE_PATTERN: Regex = Regex::new(&format!(r"^afstate\({}\)$", TERM)).unwrap();
    static ref EXPANSION_PATTERN: Regex =
        Regex::new(&format!(r"^expansionOf\({},{}\)$", TERM, TERM)).unwrap();
    static ref ARG_IN_STATE_PATTERN: Regex =
        Regex::new(&format!(r"^argInState\({},{}\)$", TERM, TERM)).unwrap();
    static ref ATT_IN_STATE_PATTERN: Regex =
        Regex::new(&format!(r"^attInState\({},{},{}\)$", TERM, TERM, TERM)).unwrap();
    static ref PRP_PATTERN: Regex = Regex::new(&format!(r"^prp\({}\)$", TERM)).unwrap();
    static ref PRP_LIST_PATTERN: Regex =
        Regex::new(&format!(r"^prp\({},{}\)$", TERM, LIST)).unwrap();
    static ref MS_PATTERN: Regex = Regex::new(&format!(r"^ms\({}\)$", LIST)).unwrap();
    static ref WEIGHT_PATTERN: Regex =
        Regex::new(&format!(r"^weight\({},\s*(-?\d+)\s*\)$", TERM)).unwrap();
}

fn read_name(s: &str) -> Result<Warned<String>> {
    let trimmed = s.trim();
    if !NAME_PATTERN.is_match(trimmed) {
        return Err(anyhow!(r#"invalid name "{}""#, trimmed));
    }
    let name = Warned::new(trimmed.to_string());
    if trimmed.len() == s.len() {
        Ok(name)
    } else {
        Ok(name.warn("names beginning or ending by spaces may be ambiguous".to_string()))
    }
}

fn captured_name(c: &Captures, i: usize) -> Result<Warned<String>> {
    read_name(&c[i])
}

fn captured_list(c: &Captures, i: usize) -> Result<Warned<Vec<String>>> {
    let list = &c[i];
    if list.trim().is_empty() {
        return Ok(Warned::new(vec![]));
    }
    let names = list.split(',').map(read_name).collect::<Result<Vec<_>>>()?;
    Ok(Warned::gather(names))
}

fn read_fact(fact: &str, builder: &mut ModelBuilder<String>) -> Result<Warned<()>> {
    if let Some(c) = ARG_PATTERN.captures(fact) {
        return Ok(captured_name(&c, 1)?.map(|a| builder.add_argument(a)));
    }
    if let Some(c) = ATT_PATTERN.captures(fact) {
        return Ok(captured_name(&c, 1)?
            .and(captured_name(&c, 2)?)
            .map(|(a, b)| builder.add_attack(a, b)));
    }
    if let Some(c) = AFSTATE_PATTERN.captures(fact) {
        return Ok(captured_name(&c, 1)?.map(|s| builder.add_state(s)));
    }
    if let Some(c) = EXPANSION_PATTERN.captures(fact) {
        return Ok(captured_name(&c, 1)?
            .and(captured_name(&c, 2)?)
            .map(|(s1, s2)| builder.add_expansion(s1, s2)));
    }
    if let Some(c) = ARG_IN_STATE_PATTERN.captures(fact) {
        return Ok(captured_name(&c, 1)?
            .and(captured_name(&c, 2)?)
            .map(|(a, s)| builder.add_argument_in_state(a, s)));
    }
    if let Some(c) = ATT_IN_STATE_PATTERN.captures(fact) {
        return Ok(captured_name(&c, 1)?
            .and(captured_name(&c, 2)?)
            .and(captured_name(&c, 3)?)
            .map(|((a, b), s)| builder.add_attack_in_state(a, b, s)));
    }
    if let Some(c) = PRP_PATTERN.captures(fact) {
        return Ok(captured_name(&c, 1)?.map(|p| builder.add_property(p)));
    }
    if let Some(c) = PRP_LIST_PATTERN.captures(fact) {
        return Ok(captured_name(&c, 1)?
            .and(captured_list(&c, 2)?)
            .map(|(a, ps)| builder.add_argument_properties(a, ps)));
    }
    if let Some(c) = MS_PATTERN.captures(fact) {
        return Ok(captured_list(&c, 1)?.map(|ps| builder.add_motivational_state(ps)));
    }
    if let Some(c) = WEIGHT_PATTERN.captures(fact) {
        let weight = c[2]
            .parse::<i64>()
            .with_context(|| format!(r#"invalid weight "{}""#, &c[2]))?;
        return Ok(captured_name(&c, 1)?.map(|p| builder.add_weight(p, weight)));
    }
    Err(anyhow!(r#"syntax error in fact "{}""#, fact))
}

/// A reader for argumentation models given as logic facts.
///
/// Each fact ends with a dot; several facts may share a line, and facts may come in any order.
/// The text following a `%` up to the end of the line is a comment.
/// Names begin with a letter or an underscore, followed by letters, digits and underscores.
/// The [LabelType](crate::utils::LabelType) of the returned models is [String].
///
/// # Facts format
///
/// | fact | meaning |
/// |------|---------|
/// | `arg(a).` | `a` is an argument |
/// | `att(a,b).` | `a` attacks `b` |
/// | `afstate(s).` | `s` is a framework state |
/// | `expansionOf(s1,s2).` | the state `s1` is an expansion of `s2` |
/// | `argInState(a,s).` | the argument `a` belongs to the state `s` |
/// | `attInState(a,b,s).` | `a` attacks `b` in the state `s` |
/// | `prp(p).` | `p` is a property |
/// | `prp(a,[p,q]).` | the properties of `a` are `p` and `q` |
/// | `ms([p,q]).` | `{p,q}` is a legal motivational state |
/// | `weight(p,-2).` | the weight of `p` is `-2` |
///
/// The following content defines an argument `a` holding a property `p` of weight 1, attacked by an argument `b`.
///
/// ```text
/// arg(a). arg(b).
/// att(b,a).
/// prp(p). weight(p,1). % weights default to 0
/// prp(a,[p]).
/// ms([p]).
/// ```
///
/// Structural errors (e.g. an attack involving an undeclared argument) are reported as [`InvalidModel`](crate::aa::InvalidModel) errors.
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
/// # read_model_from_str("arg(a). att(a,a).");
/// ```
#[derive(Default)]
pub struct FactsReader {
    warning_handlers: Vec<WarningHandler>,
}

impl InstanceReader<String> for FactsReader {
    fn read(&self, reader: &mut dyn Read) -> Result<ArgumentationModel<String>> {
        let mut builder = ModelBuilder::default();
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let l = line.with_context(context)?;
            let content = match l.find('%') {
                Some(n) => &l[..n],
                None => &l[..],
            };
            let mut facts = content.split('.').collect::<Vec<&str>>();
            let trailing = facts.pop().unwrap_or_default();
            if !trailing.trim().is_empty() {
                return Err(anyhow!(r#"missing dot after "{}""#, trailing.trim()))
                    .with_context(context);
            }
            for fact in facts {
                read_fact(fact.trim(), &mut builder)
                    .with_context(context)?
                    .consume_warnings(|w| {
                        self.warning_handlers
                            .iter()
                            .for_each(|h| (h)(1 + i, w.to_string()))
                    });
            }
        }
        builder.build().context("while checking the model")
    }

    fn read_arg_from_str<'a>(
        &self,
        model: &'a ArgumentationModel<String>,
        arg: &str,
    ) -> Result<&'a Argument<String>> {
        model.framework().argument_set().get_label(&arg.to_string())
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aa::InvalidModel;
    use std::{cell::RefCell, rc::Rc};

    fn read(instance: &str) -> Result<ArgumentationModel<String>> {
        FactsReader::default().read(&mut instance.as_bytes())
    }

    fn str_args(model: &ArgumentationModel<String>) -> Vec<String> {
        model
            .framework()
            .argument_set()
            .iter()
            .map(|s| format!("{}", s))
            .collect()
    }

    fn str_attacks(model: &ArgumentationModel<String>) -> Vec<String> {
        model
            .framework()
            .iter_attacks()
            .map(|a| format!("({},{})", a.attacker(), a.attacked()))
            .collect()
    }

    #[test]
    fn test_read_name_ok() {
        for (expected, actual) in [("a", "a"), ("_a", "_a"), ("a1_", "a1_"), ("a", " a ")] {
            assert_eq!(
                expected.to_string(),
                read_name(actual).unwrap().consume_warnings(|_| {})
            );
        }
    }

    #[test]
    fn test_read_name_wrong() {
        for name in ["1a", "a.b", "", " ", "a b", "[a]"] {
            assert!(read_name(name).is_err(), "{}", name);
        }
    }

    #[test]
    fn test_read_ok() {
        let model = read("arg(a).\narg(b).\natt(a,b).\n").unwrap();
        assert_eq!(vec!["a".to_string(), "b".to_string()], str_args(&model));
        assert_eq!(vec!["(a,b)".to_string()], str_attacks(&model));
    }

    #[test]
    fn test_read_empty() {
        let model = read("\n").unwrap();
        assert_eq!(vec![] as Vec<String>, str_args(&model));
        assert_eq!(vec![] as Vec<String>, str_attacks(&model));
    }

    #[test]
    fn test_read_any_order_and_comments() {
        let model = read("att(a,b). % a attacks b\n\n% arguments\narg(b). arg(a).\n").unwrap();
        assert_eq!(vec!["b".to_string(), "a".to_string()], str_args(&model));
        assert_eq!(vec!["(a,b)".to_string()], str_attacks(&model));
    }

    #[test]
    fn test_read_syntax_errors() {
        for instance in [
            "argument(a).\n",
            "arg(a)\n",
            "arg(a).arg(b)\n",
            "att(a).\n",
            "arg(1a).\n",
            "weight(p,x).\n",
            "ms(p).\n",
            "arg(a)..\n",
        ] {
            assert!(read(instance).is_err(), "{}", instance);
        }
    }

    #[test]
    fn test_read_unknown_arg_in_att() {
        let err = read("arg(a).\narg(b).\natt(a,c).\n").err().unwrap();
        assert_eq!(
            Some(&InvalidModel::UndeclaredArgument {
                argument: "c".to_string(),
                context: "att(a,c)".to_string()
            }),
            err.downcast_ref::<InvalidModel>()
        );
    }

    #[test]
    fn test_read_states() {
        let model = read(
            "afstate(s1). afstate(s2).\nexpansionOf(s2,s1).\nargInState(a,s1).\nargInState(b,s2).\nattInState(b,a,s2).\n",
        )
        .unwrap();
        assert_eq!(vec!["a".to_string(), "b".to_string()], str_args(&model));
        assert_eq!(vec!["(b,a)".to_string()], str_attacks(&model));
        let s2 = model.states().state_set().get_label(&"s2".to_string()).unwrap();
        assert_eq!(2, model.effective_arguments(s2).len());
        assert_eq!(1, model.effective_attacks(s2).len());
    }

    #[test]
    fn test_read_expansion_cycle() {
        let err = read("afstate(s1). afstate(s2).\nexpansionOf(s2,s1).\nexpansionOf(s1,s2).\n")
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<InvalidModel>(),
            Some(InvalidModel::ExpansionCycle(_))
        ));
    }

    #[test]
    fn test_read_properties() {
        let model = read(
            "arg(a). arg(b).\nprp(p). prp(q).\nprp(a,[p, q]).\nprp(b,[]).\nweight(p,-2).\nms([q,p]).\n",
        )
        .unwrap();
        let properties = model.properties();
        assert_eq!(2, properties.property_set().len());
        assert_eq!(-2, properties.weight_of(0));
        assert_eq!(0, properties.weight_of(1));
        assert_eq!(&[0, 1], properties.property_ids_of(0));
        assert!(properties.property_ids_of(1).is_empty());
        assert!(properties.is_legal(&[0, 1]));
    }

    #[test]
    fn test_read_undeclared_property() {
        let err = read("prp(p).\nms([p,q]).\n").err().unwrap();
        assert!(matches!(
            err.downcast_ref::<InvalidModel>(),
            Some(InvalidModel::UndeclaredProperty { .. })
        ));
        let err = read("prp(p).\nweight(q,1).\n").err().unwrap();
        assert!(matches!(
            err.downcast_ref::<InvalidModel>(),
            Some(InvalidModel::UndeclaredProperty { .. })
        ));
    }

    #[test]
    fn test_read_warn_arg_spaces() {
        let instance = "arg( a).\narg(b).\natt(a, b ).\n";
        let warnings = Rc::new(RefCell::new(vec![]));
        let warnings_clone = Rc::clone(&warnings);
        let closure = Box::new(move |i, w| warnings_clone.borrow_mut().push((i, w)));
        let mut reader = FactsReader::default();
        reader.add_warning_handler(closure);
        reader.read(&mut instance.as_bytes()).unwrap();
        let expected = "names beginning or ending by spaces may be ambiguous".to_string();
        assert_eq!(
            warnings.borrow().clone(),
            vec![(1, expected.clone()), (3, expected)]
        );
    }

    #[test]
    fn test_read_arg_from_str() {
        let instance = "arg(a).\natt(a,a).\n";
        let reader = FactsReader::default();
        let model = reader.read(&mut instance.as_bytes()).unwrap();
        assert_eq!(1, model.framework().n_arguments());
        assert!(reader.read_arg_from_str(&model, "a").is_ok());
        assert!(reader.read_arg_from_str(&model, "b").is_err());
    }
}
