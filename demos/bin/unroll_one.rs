//! Enumerate the equivalence class of a small hand-built identity circuit.

use clap::Parser;

use idrc_demos::{init_tracing, print_header, print_result, print_section, print_success};
use idrc_ir::{Circuit, Gate, Wire};
use idrc_unroll::{unroll, CancelToken};

#[derive(Parser, Debug)]
#[command(name = "unroll-one")]
#[command(about = "Enumerate the equivalence class of a built-in two-CNOT identity")]
struct Args {
    /// Upper bound on the number of equivalents to enumerate.
    #[arg(long, default_value_t = usize::MAX)]
    max_equivalents: usize,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    print_header("Equivalence Class Unrolling");

    let mut circuit = Circuit::new(2);
    circuit.push(Gate::cnot(Wire(0), Wire(1)).unwrap()).unwrap();
    circuit.push(Gate::cnot(Wire(0), Wire(1)).unwrap()).unwrap();

    print_result("Width", circuit.width());
    print_result("Length", circuit.len());
    print_result("Is identity", circuit.simulate().unwrap().is_identity());

    print_section("Unrolling");
    let cancel = CancelToken::new();
    let report = unroll(&circuit, args.max_equivalents, &cancel).unwrap();

    print_result("Equivalents found", report.circuits.len());
    print_result("Fully unrolled", report.fully_unrolled);
    for (i, eq) in report.circuits.iter().enumerate() {
        print_result(&format!("  [{i}] composition"), format!("{:?}", eq.composition()));
    }

    print_success("Unroll complete");
}
