//! The default per-term synthesis strategy.

use alsvid_ir::GateStream;
use alsvid_pauli::SparseHamiltonian;
use rayon::prelude::*;

use crate::assemble::{Assembler, Layout};
use crate::error::SynthResult;
use crate::lower::{LadderShape, LoweredFactor, LoweringConfig, lower_factor};
use crate::plugin::SynthesisPlugin;
use crate::request::{EvolutionRequest, options};
use crate::trotter::expand;

/// Lowering fans out over rayon once the factor list is worth the
/// scheduling overhead; below this it runs inline.
const PARALLEL_THRESHOLD: usize = 64;

/// Product-formula synthesis: expand the evolution into ordered factors,
/// lower each factor independently, assemble in factor order.
///
/// Factor lowering is embarrassingly parallel (each block depends only on
/// its own factor); the assembler then concatenates blocks by factor
/// index, never by completion order, because the product formula's
/// correctness is its composition order.
pub struct ProductFormula;

impl ProductFormula {
    fn config(request: &EvolutionRequest) -> LoweringConfig {
        LoweringConfig {
            ladder: if request.options.get_bool(options::CX_FOUNTAIN).unwrap_or(false) {
                LadderShape::Fountain
            } else {
                LadderShape::Chain
            },
            native_2q: request.options.get_bool(options::NATIVE_2Q).unwrap_or(false),
        }
    }
}

impl SynthesisPlugin for ProductFormula {
    fn name(&self) -> &'static str {
        "product-formula"
    }

    fn synthesize(
        &self,
        hamiltonian: &SparseHamiltonian,
        request: &EvolutionRequest,
        layout: &Layout,
    ) -> SynthResult<GateStream> {
        let factors = expand(hamiltonian, request)?;
        let config = Self::config(request);

        let lowered: Vec<LoweredFactor> = if factors.len() >= PARALLEL_THRESHOLD {
            factors
                .par_iter()
                .map(|factor| lower_factor(factor, &config))
                .collect()
        } else {
            factors
                .iter()
                .map(|factor| lower_factor(factor, &config))
                .collect()
        };

        let insert_barriers = request
            .options
            .get_bool(options::INSERT_BARRIERS)
            .unwrap_or(false);
        let mut assembler = Assembler::new(layout.clone(), !request.upto_phase());
        let last = lowered.len().saturating_sub(1);
        for (index, block) in lowered.into_iter().enumerate() {
            assembler.push_block(block)?;
            if insert_barriers && index < last {
                assembler.push_barrier()?;
            }
        }
        Ok(assembler.finish())
    }
}
