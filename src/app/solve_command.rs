use super::{cli_manager, command::Command, common};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use dialabri::{
    aa::{Argument, ArgumentationModel},
    dialogues::{AbductiveDialogueSolver, DialogueSolver, Problem, PropertyDialogueSolver},
    io::{DialogueWriter, FactsReader, InstanceReader},
};
use log::info;
use std::str::FromStr;

const CMD_NAME: &str = "solve";

const ARG_PROBLEM: &str = "PROBLEM";
const ARG_ARG: &str = "ARG";
const ARG_LIMIT: &str = "LIMIT";

pub(crate) struct SolveCommand;

impl SolveCommand {
    pub(crate) fn new() -> Self {
        SolveCommand
    }
}

impl<'a> Command<'a> for SolveCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Looks for the dialogues proving the acceptance of an argument")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(
                Arg::with_name(ARG_PROBLEM)
                    .short("p")
                    .empty_values(false)
                    .multiple(false)
                    .help("the problem to solve")
                    .required(true),
            )
            .arg(
                Arg::with_name(ARG_ARG)
                    .short("a")
                    .empty_values(false)
                    .multiple(false)
                    .help("the claim of the dialogues")
                    .required(true),
            )
            .arg(
                Arg::with_name(ARG_LIMIT)
                    .long("limit")
                    .empty_values(false)
                    .multiple(false)
                    .default_value("1")
                    .help("the maximal number of dialogues to display (0 for all)")
                    .required(false),
            )
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let file = arg_matches
            .value_of(common::ARG_INPUT)
            .ok_or_else(|| anyhow!("missing input file"))?;
        let str_problem = arg_matches
            .value_of(ARG_PROBLEM)
            .ok_or_else(|| anyhow!("missing problem"))?;
        let problem = Problem::from_str(str_problem)
            .map_err(|_| anyhow!(r#"unknown problem "{}""#, str_problem))?;
        let limit = arg_matches
            .value_of(ARG_LIMIT)
            .unwrap_or("1")
            .parse::<usize>()
            .context("while parsing the dialogue limit")?;
        let mut reader = FactsReader::default();
        let model = common::read_file_path(file, &mut reader)?;
        let arg = arg_matches
            .value_of(ARG_ARG)
            .ok_or_else(|| anyhow!("missing argument"))
            .and_then(|a| reader.read_arg_from_str(&model, a))
            .context("while parsing the argument passed to the command line")?;
        solve(&model, problem, arg, limit)
    }
}

fn take<I>(items: I, limit: usize) -> Vec<I::Item>
where
    I: Iterator,
{
    let taken: Vec<I::Item> = if limit == 0 {
        items.collect()
    } else {
        items.take(limit).collect()
    };
    info!("found {} dialogue(s)", taken.len());
    taken
}

fn solve(
    model: &ArgumentationModel<String>,
    problem: Problem,
    arg: &Argument<String>,
    limit: usize,
) -> Result<()> {
    info!("solving {} for argument {}", problem.as_ref(), arg);
    let writer = DialogueWriter::default();
    let mut out = std::io::stdout();
    match problem {
        Problem::SkepticalGrounded => {
            let solver = DialogueSolver::new(model);
            writer.write_dialogues(&mut out, &take(solver.skeptical_dialogues(arg), limit))
        }
        Problem::CredulousComplete | Problem::CredulousPreferred => {
            let solver = DialogueSolver::new(model);
            writer.write_dialogues(&mut out, &take(solver.credulous_dialogues(arg), limit))
        }
        Problem::AbductiveGrounded => {
            let solver = AbductiveDialogueSolver::new(model);
            writer.write_explanations(&mut out, &take(solver.abductive_explanations(arg), limit))
        }
        Problem::WeakAcceptance => {
            let solver = PropertyDialogueSolver::new(model);
            writer.write_weak_acceptance_dialogues(
                &mut out,
                &take(solver.weak_acceptance_dialogues(arg), limit),
            )
        }
    }
}
