use std::env;
use std::fs;
use std::io::{self, Read, Write};

use anyhow::Error;
use clap::{value_t, values_t, App, AppSettings, Arg, ArgMatches};
use env_logger::{fmt, Builder, Target};
use log::{error, info};
use log::{Level, LevelFilter, Record};
use rand::{rngs::StdRng, Rng, SeedableRng};

use satoracle::config::{SolverConfig, SolverConfigUpdate};
use satoracle::dimacs::write_dimacs;
use satoracle::random::RandomCnf;
use satoracle::Solver;

fn main() {
    let exit_code = match main_with_err() {
        Err(err) => {
            error!("{}", err);
            1
        }
        Ok(exit_code) => exit_code,
    };
    std::process::exit(exit_code);
}

fn init_logging() {
    let format = |buf: &mut fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "c {}", record.args())
        } else {
            writeln!(buf, "c {}: {}", record.level(), record.args())
        }
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stdout)
        .format(format)
        .filter(None, LevelFilter::Info);

    if let Ok(ref env_var) = env::var("SATORACLE_LOG") {
        builder.parse_filters(env_var);
    }

    builder.init();
}

fn banner() {
    info!("This is satoracle {}", env!("SATORACLE_VERSION"));
    info!(
        "  {} build - {}",
        env!("SATORACLE_PROFILE"),
        env!("SATORACLE_RUSTC_VERSION")
    );
}

fn app() -> App<'static, 'static> {
    App::new("satoracle")
        .version(env!("SATORACLE_VERSION"))
        .setting(AppSettings::DisableHelpSubcommand)
        .arg_from_usage("[INPUT] 'The input file to use (stdin if omitted)'")
        .arg_from_usage("[config-file] --config=[FILE] 'Read parameters from configuration file'")
        .arg(
            Arg::from_usage("[config-option] -C --config-option")
                .value_name("OPTION>=<VALUE")
                .help(
                    "Specify a single config option, see 'satoracle -C help' for a list of \
                     options.",
                )
                .multiple(true)
                .number_of_values(1),
        )
        .arg(
            Arg::from_usage("--random 'Solve a random formula instead of reading the input'")
                .conflicts_with("INPUT"),
        )
        .arg(
            Arg::from_usage("[vars] --vars=[N] 'Number of variables of the random formula'")
                .default_value("20"),
        )
        .arg(
            Arg::from_usage("[clauses] --clauses=[N] 'Number of clauses of the random formula'")
                .default_value("80"),
        )
        .arg(
            Arg::from_usage("[clause-len] --clause-len=[K] 'Literals per random clause'")
                .default_value("3"),
        )
        .arg_from_usage("[seed] --seed=[SEED] 'Seed for the random formula'")
        .arg_from_usage("--distinct 'Use distinct variables within each random clause'")
        .arg_from_usage("[write-cnf] --write-cnf=[FILE] 'Write the formula in DIMACS CNF format'")
        .arg_from_usage("--print-formula 'Log the formula as text'")
        .arg_from_usage("--verify 'Check the model against every clause'")
}

fn main_with_err() -> Result<i32, Error> {
    let matches = app().get_matches();

    if values_t!(matches, "config-option", String)
        .unwrap_or_default()
        .iter()
        .any(|option| option == "help")
    {
        print!("{}", SolverConfig::help());
        return Ok(0);
    }

    init_logging();
    banner();

    let mut config_update = SolverConfigUpdate::new();

    if let Some(config_path) = matches.value_of("config-file") {
        let mut config_contents = String::new();
        fs::File::open(config_path)?.read_to_string(&mut config_contents)?;

        config_update.merge(toml::from_str(&config_contents)?);
    }

    for config_option in values_t!(matches, "config-option", String).unwrap_or_default() {
        config_update.merge(toml::from_str(&config_option)?);
    }

    let mut solver = Solver::new();

    solver.config(&config_update);

    if matches.is_present("random") {
        add_random_formula(&mut solver, &matches)?;
    } else {
        let stdin = io::stdin();

        let mut locked_stdin;
        let mut opened_file;

        let file = match matches.value_of("INPUT") {
            Some(path) => {
                info!("Reading file '{}'", path);
                opened_file = fs::File::open(path)?;
                &mut opened_file as &mut dyn io::Read
            }
            None => {
                info!("Reading from stdin");
                locked_stdin = stdin.lock();
                &mut locked_stdin as &mut dyn io::Read
            }
        };

        solver.add_dimacs_cnf(file)?;
    }

    if solver.is_3cnf() {
        info!("Formula is in 3-CNF");
    }

    if matches.is_present("print-formula") {
        info!("Formula: {}", solver.formula());
    }

    if let Some(path) = matches.value_of("write-cnf") {
        info!("Writing formula to file '{}'", path);
        let mut target = io::BufWriter::new(fs::File::create(path)?);
        write_dimacs(&mut target, solver.formula())?;
        target.flush()?;
    }

    let sat = solver.solve();

    let stats = solver.stats();
    info!(
        "{} decisions, {} propagations, {} pure literals, {} conflicts, max depth {}",
        stats.decisions, stats.propagations, stats.pure_literals, stats.conflicts, stats.max_depth
    );

    if !sat {
        println!("s UNSATISFIABLE");
        return Ok(20);
    }

    if matches.is_present("verify") {
        solver.check_model()?;
        info!("Model verified");
    }

    println!("s SATISFIABLE");
    print!("v");
    if let Some(model) = solver.model() {
        for lit in model.lits() {
            print!(" {}", lit);
        }
    }
    println!(" 0");
    Ok(10)
}

fn add_random_formula(solver: &mut Solver, matches: &ArgMatches) -> Result<(), Error> {
    let seed = match matches.value_of("seed") {
        Some(_) => value_t!(matches, "seed", u64)?,
        None => rand::thread_rng().gen(),
    };

    let generator = RandomCnf {
        var_count: value_t!(matches, "vars", usize)?,
        clause_count: value_t!(matches, "clauses", usize)?,
        clause_len: value_t!(matches, "clause-len", usize)?,
        distinct_vars: matches.is_present("distinct"),
    };

    info!(
        "Generating random formula with {} variables and {} clauses of length {} (seed {})",
        generator.var_count, generator.clause_count, generator.clause_len, seed
    );

    let formula = generator.generate(&mut StdRng::seed_from_u64(seed))?;
    solver.add_formula(&formula);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_defaults() {
        let matches = app().get_matches_from(vec!["satoracle", "--random", "--seed", "7"]);

        assert!(matches.is_present("random"));
        assert_eq!(value_t!(matches, "vars", usize).unwrap(), 20);
        assert_eq!(value_t!(matches, "clauses", usize).unwrap(), 80);
        assert_eq!(value_t!(matches, "clause-len", usize).unwrap(), 3);
        assert_eq!(value_t!(matches, "seed", u64).unwrap(), 7);
    }

    #[test]
    fn random_formula_is_reproducible() {
        let args = vec!["satoracle", "--random", "--seed", "3", "--vars", "10"];

        let mut first = Solver::new();
        add_random_formula(&mut first, &app().get_matches_from(args.clone())).unwrap();
        let mut second = Solver::new();
        add_random_formula(&mut second, &app().get_matches_from(args)).unwrap();

        assert_eq!(first.formula(), second.formula());
        assert!(first.var_count() <= 10);
        assert_eq!(first.clause_count(), 80);
        assert!(first.is_3cnf());
    }

    #[test]
    fn input_conflicts_with_random() {
        assert!(app()
            .get_matches_from_safe(vec!["satoracle", "--random", "input.cnf"])
            .is_err());
    }

    #[test]
    fn config_options() {
        let matches = app().get_matches_from(vec![
            "satoracle",
            "-C",
            "branch_polarity = false",
            "-C",
            "pure_literal_elimination = false",
        ]);

        let mut update = SolverConfigUpdate::new();
        for option in values_t!(matches, "config-option", String).unwrap() {
            update.merge(toml::from_str(&option).unwrap());
        }

        let mut config = SolverConfig::default();
        config.apply(&update);
        assert!(!config.branch_polarity);
        assert!(!config.pure_literal_elimination);
    }
}
