use clap::{Parser as ClapParser, Subcommand};
use shunt::Profile;
use shunt::cli::{self, CliError, FilterOptions, FilterOutcome, ScoreOptions, ScoreOutcome};
use shunt::output::{to_json, to_json_pretty};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "shunt")]
#[command(about = "Shunt - compile scoring formulas and boolean filter expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile and evaluate a scoring formula
    Score {
        /// The formula to evaluate
        formula: String,

        /// Variables as a JSON object (reads from stdin if not provided)
        #[arg(long)]
        vars: Option<String>,

        /// A single variable as name=number (repeatable)
        #[arg(long = "var")]
        assignments: Vec<String>,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Compile a filter expression to its JSON tree
    Filter {
        /// The filter expression to compile
        expression: String,

        /// Leaves as a JSON object of name -> payload (reads from stdin if not provided)
        #[arg(long)]
        leaves: Option<String>,

        /// A leaf whose payload is its own name (repeatable)
        #[arg(long = "leaf")]
        names: Vec<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't resolve leaves
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the reverse Polish form of an expression
    Rpn {
        /// The expression to convert
        expression: String,

        /// Language of the expression: score or filter
        #[arg(long, default_value = "score")]
        profile: Profile,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'shunt docs' to list categories)
        category: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            formula,
            vars,
            assignments,
            syntax_only,
        } => run_score(formula, vars, assignments, syntax_only),
        Commands::Filter {
            expression,
            leaves,
            names,
            pretty,
            syntax_only,
        } => run_filter(expression, leaves, names, pretty, syntax_only),
        Commands::Rpn {
            expression,
            profile,
        } => cli::execute_rpn(&expression, profile).map(|rpn| println!("{}", rpn)),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => match cli::get_doc_category(&category) {
            Ok(content) => {
                print!("{}", content);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Reads stdin when it is piped and `explicit` was not given.
fn piped_input(explicit: Option<String>, skip: bool) -> Result<Option<String>, CliError> {
    match explicit {
        Some(s) => Ok(Some(s)),
        None if !skip && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok(Some(buffer).filter(|b| !b.trim().is_empty()))
        }
        None => Ok(None),
    }
}

fn run_score(
    formula: String,
    vars: Option<String>,
    assignments: Vec<String>,
    syntax_only: bool,
) -> Result<(), CliError> {
    let options = ScoreOptions {
        vars: piped_input(vars, syntax_only || !assignments.is_empty())?,
        formula,
        assignments,
        syntax_only,
    };

    match cli::execute_score(&options)? {
        ScoreOutcome::SyntaxValid => println!("Syntax is valid"),
        ScoreOutcome::Value(value) => println!("{}", value),
    }
    Ok(())
}

fn run_filter(
    expression: String,
    leaves: Option<String>,
    names: Vec<String>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let options = FilterOptions {
        leaves: piped_input(leaves, syntax_only || !names.is_empty())?,
        expression,
        names,
        syntax_only,
    };

    match cli::execute_filter(&options)? {
        FilterOutcome::SyntaxValid => println!("Syntax is valid"),
        FilterOutcome::Tree(tree) => {
            let json = if pretty {
                to_json_pretty(&tree)
            } else {
                to_json(&tree)
            };
            println!("{}", json);
        }
    }
    Ok(())
}
