//! Surface classification: one region label per face by majority vote.

use crate::biome::RegionLabel;
use crate::error::TerrainError;

/// Most frequent label in `labels`.
///
/// Ties go to whichever of the tied labels appears first. Returns `None`
/// for an empty slice.
pub fn majority_label(labels: &[RegionLabel]) -> Option<RegionLabel> {
    let mut best: Option<(RegionLabel, usize)> = None;
    for (i, &label) in labels.iter().enumerate() {
        if labels[..i].contains(&label) {
            continue;
        }
        let count = labels[i..].iter().filter(|&&l| l == label).count();
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

/// Labels every face with the majority label of its vertices.
///
/// The result is the per-face material slot: slot `i` is the material of
/// biome-table entry `i`.
///
/// # Errors
///
/// Returns [`TerrainError::VertexOutOfRange`] if a face references a vertex
/// without a label, or [`TerrainError::EmptyFace`] for a face with no vertices.
pub fn classify_faces<F: AsRef<[u32]>>(
    faces: &[F],
    labels: &[RegionLabel],
) -> Result<Vec<RegionLabel>, TerrainError> {
    let mut corner_labels = Vec::with_capacity(4);
    let mut out = Vec::with_capacity(faces.len());

    for (face_index, face) in faces.iter().enumerate() {
        corner_labels.clear();
        for &vertex in face.as_ref() {
            let label = labels
                .get(vertex as usize)
                .ok_or(TerrainError::VertexOutOfRange {
                    face: face_index,
                    vertex,
                    len: labels.len(),
                })?;
            corner_labels.push(*label);
        }
        let majority =
            majority_label(&corner_labels).ok_or(TerrainError::EmptyFace(face_index))?;
        out.push(majority);
    }

    Ok(out)
}
