use nalgebra::DMatrix;

use crate::atom::PointCharge;
use crate::basis::BasisSet;
use crate::context::IntegralConfig;
use crate::error::Result;

use super::{Engine, Operator};

/// Shell pairs handed to one worker at a time when the `rayon` feature is
/// enabled.
#[cfg(feature = "rayon")]
const CHUNK_SIZE: usize = 64;

/// Assembles the full `N x N` matrix of `operator` over `basis`, visiting
/// each unordered shell pair exactly once and scattering the block and its
/// transpose into the output.
///
/// Each output region is written by exactly one block, so the result is
/// bit-for-bit identical regardless of evaluation order.
pub fn one_electron_matrix(
    basis: &BasisSet,
    operator: Operator,
    config: &IntegralConfig,
    charges: &[PointCharge],
) -> Result<DMatrix<f64>> {
    config.validate()?;

    let n = basis.num_basis_functions();
    log::debug!(
        "assembling {operator:?} matrix: {n} basis functions, {} shells",
        basis.num_shells()
    );

    let pairs = shell_pairs(basis.num_shells());
    let blocks = compute_blocks(basis, operator, config, charges, &pairs)?;

    let mut result = DMatrix::zeros(n, n);
    for ((s1, s2), block) in pairs.into_iter().zip(blocks) {
        let bf1 = basis.first_basis_function(s1);
        let bf2 = basis.first_basis_function(s2);
        let (n1, n2) = block.shape();

        result.view_mut((bf1, bf2), (n1, n2)).copy_from(&block);
        if s1 != s2 {
            result
                .view_mut((bf2, bf1), (n2, n1))
                .copy_from(&block.transpose());
        }
    }
    Ok(result)
}

/// All unordered pairs, `s2 <= s1` - half the work of the naive full loop.
fn shell_pairs(num_shells: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(num_shells * (num_shells + 1) / 2);
    for s1 in 0..num_shells {
        for s2 in 0..=s1 {
            pairs.push((s1, s2));
        }
    }
    pairs
}

#[cfg(feature = "rayon")]
fn compute_blocks(
    basis: &BasisSet,
    operator: Operator,
    config: &IntegralConfig,
    charges: &[PointCharge],
    pairs: &[(usize, usize)],
) -> Result<Vec<DMatrix<f64>>> {
    use rayon::iter::ParallelIterator;
    use rayon::slice::ParallelSlice;

    let chunks = pairs
        .par_chunks(CHUNK_SIZE)
        .map(|chunk| {
            let mut engine = Engine::new(basis, operator, config, charges)?;
            Ok(chunk
                .iter()
                .map(|&(s1, s2)| engine.compute_block(&basis.shells()[s1], &basis.shells()[s2]))
                .collect::<Vec<_>>())
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(chunks.into_iter().flatten().collect())
}

#[cfg(not(feature = "rayon"))]
fn compute_blocks(
    basis: &BasisSet,
    operator: Operator,
    config: &IntegralConfig,
    charges: &[PointCharge],
    pairs: &[(usize, usize)],
) -> Result<Vec<DMatrix<f64>>> {
    let mut engine = Engine::new(basis, operator, config, charges)?;
    Ok(pairs
        .iter()
        .map(|&(s1, s2)| engine.compute_block(&basis.shells()[s1], &basis.shells()[s2]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::shell_pairs;

    #[test]
    fn pairs_cover_the_lower_triangle_once() {
        let pairs = shell_pairs(4);
        assert_eq!(pairs.len(), 10);
        assert!(pairs.iter().all(|&(s1, s2)| s2 <= s1));

        let mut seen = pairs.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), pairs.len());
    }
}
