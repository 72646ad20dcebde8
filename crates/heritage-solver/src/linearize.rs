//! C3 linearization.
//!
//! Plain classes (no parameterized bases anywhere in their ancestry) do not
//! carry substitution information, so their ancestor order is the class's
//! own linearization: the single total order that keeps every class before
//! its bases and preserves the declaration order of each base list.

use crate::def::ClassStore;
use crate::error::HierarchyError;
use crate::types::ClassId;

/// Compute the linearization of a class with the given declared base origins.
///
/// Returns `None` when no consistent order exists, e.g. `class X(A, B)`
/// together with `class Y(B, A)` and `class Z(X, Y)`.
pub(crate) fn c3_linearize(
    store: &ClassStore,
    head: ClassId,
    bases: &[ClassId],
) -> Option<Vec<ClassId>> {
    let mut seqs: Vec<Vec<ClassId>> = Vec::with_capacity(bases.len() + 1);
    for base in bases {
        seqs.push(store.mro(*base)?);
    }
    seqs.push(bases.to_vec());

    let mut result = vec![head];
    result.extend(c3_merge(seqs)?);
    Some(result)
}

/// Merge step of C3: repeatedly take the first head that does not appear in
/// the tail of any remaining sequence.
pub fn c3_merge(mut seqs: Vec<Vec<ClassId>>) -> Option<Vec<ClassId>> {
    let mut out = Vec::new();
    loop {
        seqs.retain(|s| !s.is_empty());
        if seqs.is_empty() {
            return Some(out);
        }

        let candidate = seqs
            .iter()
            .map(|s| s[0])
            .find(|c| !seqs.iter().any(|s| s[1..].contains(c)))?;

        out.push(candidate);
        for seq in &mut seqs {
            if seq[0] == candidate {
                seq.remove(0);
            }
        }
    }
}

/// The linear ancestor order of a registered class, self first.
pub fn linear_ancestors(store: &ClassStore, id: ClassId) -> Result<Vec<ClassId>, HierarchyError> {
    store
        .mro(id)
        .ok_or(HierarchyError::UnknownClass { id: id.0 })
}

#[cfg(test)]
#[path = "../tests/linearize_tests.rs"]
mod tests;
