//! Transverse-field Ising evolution demo.
//!
//! Builds a 1-D Ising Hamiltonian, synthesizes its time evolution with the
//! selected plugin and prints the resulting gate statistics.
//!
//! ```text
//! cargo run -p alsvid-demos --bin demo-ising -- --qubits 8 --order 2 --reps 4
//! ```

use clap::Parser;
use num_complex::Complex64;
use tracing::info;

use alsvid_pauli::SparseHamiltonian;
use alsvid_synth::{DEFAULT_PLUGIN, EvolutionRequest, Layout, options, synthesize};

#[derive(Parser)]
#[command(name = "demo-ising", about = "Synthesize a transverse-field Ising evolution")]
struct Args {
    /// Number of qubits in the chain.
    #[arg(long, default_value_t = 8)]
    qubits: u32,

    /// ZZ coupling strength.
    #[arg(long, default_value_t = 1.0)]
    coupling: f64,

    /// Transverse field strength.
    #[arg(long, default_value_t = 0.5)]
    field: f64,

    /// Evolution duration.
    #[arg(long, default_value_t = 1.0)]
    time: f64,

    /// Product-formula order (1 or a positive even integer).
    #[arg(long, default_value_t = 1)]
    order: u32,

    /// Number of Trotter steps.
    #[arg(long, default_value_t = 1)]
    reps: u32,

    /// Synthesis plugin name.
    #[arg(long, default_value = DEFAULT_PLUGIN)]
    plugin: String,

    /// Allow the result to differ by a global phase.
    #[arg(long, default_value_t = false)]
    upto_phase: bool,

    /// Print every instruction, not just the summary.
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// Emit the gate stream as JSON instead of the summary.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn ising(num_qubits: u32, coupling: f64, field: f64) -> SparseHamiltonian {
    let couplings = (0..num_qubits - 1)
        .map(|i| ("ZZ".to_string(), vec![i, i + 1], Complex64::new(coupling, 0.0)));
    let fields = (0..num_qubits).map(|i| ("X".to_string(), vec![i], Complex64::new(field, 0.0)));
    SparseHamiltonian::from_sparse_list(couplings.chain(fields), num_qubits)
        .expect("static Ising terms are well-formed")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let hamiltonian = ising(args.qubits, args.coupling, args.field);
    info!(
        "Ising chain: {} qubits, {} terms",
        args.qubits,
        hamiltonian.num_terms()
    );

    let request = EvolutionRequest::new(args.time)
        .with_order(args.order)
        .with_reps(args.reps)
        .with_plugin(&args.plugin)
        .with_option(options::UPTO_PHASE, args.upto_phase);

    let stream = match synthesize(&hamiltonian, &request, &Layout::identity(args.qubits)) {
        Ok(stream) => stream,
        Err(err) => {
            eprintln!("synthesis failed: {err}");
            std::process::exit(1);
        }
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stream).expect("gate stream serializes")
        );
        return;
    }

    println!(
        "plugin {} | order {} | steps {}",
        args.plugin, args.order, args.reps
    );
    println!(
        "gates {} | depth {} | global phase {}",
        stream.num_gates(),
        stream.depth(),
        stream.global_phase()
    );
    let mut counts: Vec<_> = stream.gate_counts().into_iter().collect();
    counts.sort();
    for (name, count) in counts {
        println!("  {name:6} {count}");
    }

    if args.verbose {
        for inst in stream.iter() {
            println!("{inst}");
        }
    }
}
