use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;

use formula_qe::factory::{FactoryConfig, FormulaFactory};
use formula_qe::qe::{ExistentialQuantifierElimination, UniversalQuantifierElimination};
use formula_qe::reference::FormulaRef;
use formula_qe::transformation::FormulaTransformation;
use formula_qe::types::Var;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shape {
    /// x1 <=> x2 <=> ... <=> xn
    Chain,
    /// Odd parity of x1..xn
    Parity,
    /// Clauses (xi | ~x(i+1) | x(i+2))
    Clauses,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Quantifier elimination by Shannon expansion")]
struct Cli {
    /// Number of variables.
    #[arg(value_name = "INT", default_value = "8")]
    n: usize,

    /// Number of variables to eliminate, taken from the front.
    #[arg(short, long, value_name = "INT", default_value = "3")]
    eliminate: usize,

    /// Formula to build.
    #[arg(long, value_enum, default_value = "clauses")]
    shape: Shape,

    /// Eliminate existentially instead of universally.
    #[arg(long)]
    exists: bool,

    /// Write the input and the result to a DOT file.
    #[arg(long, value_name = "FILE")]
    dot: Option<PathBuf>,

    /// Factory size (in bits, so the initial table has `2^size` buckets).
    #[arg(long, value_name = "INT", default_value = "12")]
    size: usize,

    /// Log every constructor call.
    #[arg(long)]
    debug: bool,
}

fn build(ff: &FormulaFactory, shape: Shape, xs: &[FormulaRef]) -> FormulaRef {
    match shape {
        Shape::Chain => xs
            .iter()
            .copied()
            .reduce(|acc, x| ff.equivalence(acc, x))
            .unwrap_or(ff.verum()),
        Shape::Parity => xs
            .iter()
            .copied()
            .reduce(|acc, x| ff.not(ff.equivalence(acc, x)))
            .unwrap_or(ff.falsum()),
        Shape::Clauses => {
            let clauses: Vec<FormulaRef> = xs
                .windows(3)
                .map(|w| ff.or_many([w[0], ff.not(w[1]), w[2]]))
                .collect();
            ff.and_many(clauses)
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = if args.debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();
    println!("args = {:?}", args);

    let config = FactoryConfig::default()
        .with_table_bits(args.size)
        .with_cache_bits(args.size);
    let ff = FormulaFactory::new(config);

    let vars: Vec<Var> = (1..=args.n)
        .map(|i| ff.variable_of(&format!("x{}", i)))
        .collect();
    let xs: Vec<FormulaRef> = vars.iter().map(|&v| ff.var(v)).collect();
    let f = build(&ff, args.shape, &xs);
    info!("built {:?} formula over {} variables", args.shape, args.n);
    println!("f = {}", ff.display(f));
    println!("nodes(f) = {}", ff.number_of_nodes(f));

    let k = args.eliminate.min(args.n);
    let eliminated = &vars[..k];
    let time_elim = std::time::Instant::now();
    let g = if args.exists {
        ExistentialQuantifierElimination::new(eliminated.iter().copied()).apply(&ff, f)?
    } else {
        UniversalQuantifierElimination::new(eliminated.iter().copied()).apply(&ff, f)?
    };
    info!(
        "eliminated {} variables in {:.3}s",
        k,
        time_elim.elapsed().as_secs_f64()
    );

    let quantifier = if args.exists { "exists" } else { "forall" };
    let names: Vec<String> = ff
        .sorted_by_name(eliminated.iter().copied())
        .into_iter()
        .map(|v| ff.name(v).to_string())
        .collect();
    println!("{} {}. f = {}", quantifier, names.join(", "), ff.display(g));
    println!("nodes(result) = {}", ff.number_of_nodes(g));
    let models = ff.count_models(g, &vars[k..])?;
    println!("models(result) = {} (over {} free variables)", models, args.n - k);
    println!("factory size = {}", ff.size());

    if let Some(path) = &args.dot {
        std::fs::write(path, ff.to_dot(&[f, g])?)?;
        println!("wrote DOT to {}", path.display());
    }

    println!("Total time: {:.3}s", time_total.elapsed().as_secs_f64());
    Ok(())
}
