use clap::Parser;

use seqcov_rs::alphabet::Alphabet;
use seqcov_rs::ast::Constraint;
use seqcov_rs::compiler::Compiler;
use seqcov_rs::config::Config;
use seqcov_rs::generator::Generator;
use seqcov_rs::solver::Solver;
use seqcov_rs::targets::TargetSet;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Coverage strength t.
    #[arg(short = 't', long, value_name = "INT", default_value = "2")]
    strength: usize,

    /// Maximum number of occurrences of any event in a sequence.
    #[arg(long, value_name = "INT", default_value = "2")]
    max_repetition: usize,

    /// Maximum sequence length.
    #[arg(long, value_name = "INT", default_value = "8")]
    max_length: usize,

    /// Write the compiled constraint automaton to this DOT file.
    #[arg(long, value_name = "FILE")]
    dot: Option<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    println!("args = {:?}", args);

    // Files must be opened before use, used only while open, and closed in the end.
    let alphabet = Alphabet::new(["Open", "Read", "Write", "Close"])?;
    let open = Constraint::event("Open");
    let close = Constraint::event("Close");
    let constraints = vec![
        Constraint::general_right(open.clone(), Constraint::set(["Close", "Read", "Write"])),
        Constraint::immediate_right(
            Constraint::always(open.clone()) & Constraint::general_never(open, close.clone()),
            Constraint::set(["Read", "Write", "Close"]),
        ),
        Constraint::general_left(Constraint::set(["Open", "Read", "Write"]), close),
    ];
    for c in &constraints {
        println!("constraint: {}", c);
    }
    let Some(constraint) = Constraint::all(constraints) else {
        color_eyre::eyre::bail!("no constraints");
    };

    let compiler = Compiler::new(&alphabet);
    let automaton = compiler.compile(&constraint)?;
    println!(
        "automaton: {} states, {} transitions",
        automaton.num_states(),
        automaton.num_transitions()
    );
    if let Some(path) = &args.dot {
        std::fs::write(path, automaton.to_dot(Some(&alphabet))?)?;
        println!("Wrote automaton to '{}'", path);
    }

    let config = Config::new(args.strength, args.max_repetition, args.max_length)?;
    let solver = Solver::with_automaton(&alphabet, automaton, config);
    let targets = TargetSet::from_config(&alphabet, &config);
    println!(
        "{} targets (out of {} tuples)",
        targets.len(),
        TargetSet::space_size(alphabet.len(), config.strength)
    );

    let time_total = std::time::Instant::now();
    let generation = Generator::new(solver, targets).run();

    for (i, sequence) in generation.sequences.iter().enumerate() {
        println!("{:>4}: {}", i + 1, sequence.join(" "));
    }
    if !generation.is_complete() {
        println!("{} uncoverable targets:", generation.uncovered.len());
        for target in &generation.uncovered {
            println!("      {}", target.join(" "));
        }
    }
    println!("{}", generation.stats);

    let time_total = time_total.elapsed();
    println!("\nAll done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
