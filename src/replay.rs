//! Reader for collision replay logs.
//!
//! A replay log is a dump of the shapes a physics step handed to the predicates, one vector
//! per line:
//!
//! ```text
//! P obb
//! 0, 0, 0
//! 1, 1, 1
//! 1, 0, 0
//! 0, 1, 0
//! 0, 0, 1
//! F triangles
//! 0.5 0.5 0.5
//! 3, 0, 0
//! 0, 3, 0
//! ```
//!
//! Components are separated by commas, whitespace or both. Blank lines and lines whose first
//! non-space character is `P`, `F` or `=` are section markers and are skipped. An [`Obb`] takes
//! five vectors (center, half extents, then the three axes) and a [`Triangle`] takes three.

use std::io::BufRead;
use std::num::ParseFloatError;

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::error::CollisionResult;
use crate::shapes::obb::Obb;
use crate::shapes::triangle::Triangle;
use crate::tolerance::Tolerances;
use crate::{Point3, Real, Vector3};

const OBB_BLOCK: usize = 5;
const TRIANGLE_BLOCK: usize = 3;

/// Errors raised while reading a replay log.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Reading from the underlying reader failed.
    #[error("failed to read replay log")]
    Io(#[from] std::io::Error),

    /// A component is not a valid number.
    #[error("line {line}: invalid number {token:?}")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
        /// Why it did not parse.
        #[source]
        source: ParseFloatError,
    },

    /// A data line does not hold exactly three components.
    #[error("line {line}: expected 3 components, found {found}")]
    ComponentCount {
        /// 1-based line number.
        line: usize,
        /// Number of components on the line.
        found: usize,
    },

    /// The log ends in the middle of a shape.
    #[error("incomplete block: expected {expected} vectors, found {found}")]
    IncompleteBlock {
        /// Vectors per shape.
        expected: usize,
        /// Vectors left over.
        found: usize,
    },

    /// A box has a negative half extent.
    #[error("box {block}: negative half extent")]
    NegativeHalfExtent {
        /// 0-based index of the box in the log.
        block: usize,
    },
}

fn is_marker(line: &str) -> bool {
    match line.trim_start().chars().next() {
        None => true,
        Some(first) => matches!(first, 'P' | 'F' | '='),
    }
}

/// Parses one line. `number` is 1-based and only used for error reporting.
fn parse_line(number: usize, line: &str) -> Result<Option<Vector3>, ReplayError> {
    if is_marker(line) {
        return Ok(None);
    }

    let tokens: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.len() != 3 {
        return Err(ReplayError::ComponentCount {
            line: number,
            found: tokens.len(),
        });
    }

    let mut components = [0.0 as Real; 3];
    for (component, token) in components.iter_mut().zip(&tokens) {
        *component = token
            .parse::<Real>()
            .map_err(|source| ReplayError::InvalidNumber {
                line: number,
                token: (*token).to_owned(),
                source,
            })?;
    }
    Ok(Some(Vector3::from(components)))
}

/// Parses every data line of `text` into a vector.
pub fn parse_vectors(text: &str) -> Result<Vec<Vector3>, ReplayError> {
    let mut vectors = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(vector) = parse_line(index + 1, line)? {
            vectors.push(vector);
        }
    }
    Ok(vectors)
}

/// Reads every data line of `reader` into a vector.
pub fn read_vectors<R: BufRead>(reader: R) -> Result<Vec<Vector3>, ReplayError> {
    let mut vectors = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        if let Some(vector) = parse_line(index + 1, &line?)? {
            vectors.push(vector);
        }
    }
    Ok(vectors)
}

fn blocks<const N: usize>(vectors: &[Vector3]) -> Result<Vec<[Vector3; N]>, ReplayError> {
    let chunks = vectors.chunks_exact(N);
    if !chunks.remainder().is_empty() {
        return Err(ReplayError::IncompleteBlock {
            expected: N,
            found: chunks.remainder().len(),
        });
    }
    Ok(chunks
        .map(|chunk| std::array::from_fn(|i| chunk[i]))
        .collect())
}

fn obb_from_block(index: usize, block: &[Vector3; OBB_BLOCK]) -> Result<Obb, ReplayError> {
    let [center, extents, x, y, z] = *block;
    if extents.iter().any(|&extent| extent < 0.0) {
        return Err(ReplayError::NegativeHalfExtent { block: index });
    }
    Ok(Obb::new(
        Point3::from(center),
        [extents.x, extents.y, extents.z],
        [x, y, z],
    ))
}

fn obbs_from_vectors(vectors: &[Vector3]) -> Result<Vec<Obb>, ReplayError> {
    let obbs = blocks::<OBB_BLOCK>(vectors)?
        .iter()
        .enumerate()
        .map(|(index, block)| obb_from_block(index, block))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = obbs.len(), "parsed boxes from replay log");
    Ok(obbs)
}

fn triangles_from_vectors(vectors: &[Vector3]) -> Result<Vec<Triangle>, ReplayError> {
    let triangles: Vec<Triangle> = blocks::<TRIANGLE_BLOCK>(vectors)?
        .iter()
        .map(|block| Triangle::from(block.map(Point3::from)))
        .collect();
    debug!(count = triangles.len(), "parsed triangles from replay log");
    Ok(triangles)
}

/// Parses `text` as a sequence of boxes.
pub fn parse_obbs(text: &str) -> Result<Vec<Obb>, ReplayError> {
    obbs_from_vectors(&parse_vectors(text)?)
}

/// Parses `text` as a sequence of triangles.
pub fn parse_triangles(text: &str) -> Result<Vec<Triangle>, ReplayError> {
    triangles_from_vectors(&parse_vectors(text)?)
}

/// Reads a sequence of boxes from `reader`.
pub fn read_obbs<R: BufRead>(reader: R) -> Result<Vec<Obb>, ReplayError> {
    obbs_from_vectors(&read_vectors(reader)?)
}

/// Reads a sequence of triangles from `reader`.
pub fn read_triangles<R: BufRead>(reader: R) -> Result<Vec<Triangle>, ReplayError> {
    triangles_from_vectors(&read_vectors(reader)?)
}

/// One recorded box/triangle query: a box and the triangles it was tested against.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayFrame {
    /// The box under test.
    pub obb: Obb,
    /// Triangles tested against `obb`, in log order.
    pub triangles: Vec<Triangle>,
}

impl ReplayFrame {
    /// Parses a frame: the first five vectors are the box, the rest are triangles.
    pub fn parse(text: &str) -> Result<ReplayFrame, ReplayError> {
        let vectors = parse_vectors(text)?;
        if vectors.len() < OBB_BLOCK {
            return Err(ReplayError::IncompleteBlock {
                expected: OBB_BLOCK,
                found: vectors.len(),
            });
        }
        let (head, tail) = vectors.split_at(OBB_BLOCK);
        let obb = obbs_from_vectors(head)?.remove(0);
        let triangles = triangles_from_vectors(tail)?;
        Ok(ReplayFrame { obb, triangles })
    }

    /// Runs the recorded query again. See [`replay_obb_triangles`].
    pub fn replay(&self, tolerances: &Tolerances) -> CollisionResult<Vec<bool>> {
        replay_obb_triangles(&self.obb, &self.triangles, tolerances)
    }
}

/// Tests every triangle against `obb` and returns one verdict per triangle, in order.
pub fn replay_obb_triangles(
    obb: &Obb,
    triangles: &[Triangle],
    tolerances: &Tolerances,
) -> CollisionResult<Vec<bool>> {
    let test = |triangle: &Triangle| crate::query::obb_triangle_collide_with(obb, triangle, tolerances);

    #[cfg(feature = "rayon")]
    let verdicts = triangles.par_iter().map(test).collect::<CollisionResult<Vec<_>>>()?;
    #[cfg(not(feature = "rayon"))]
    let verdicts = triangles.iter().map(test).collect::<CollisionResult<Vec<_>>>()?;

    debug!(
        triangles = verdicts.len(),
        hits = verdicts.iter().filter(|&&hit| hit).count(),
        "replayed box/triangle frame"
    );
    Ok(verdicts)
}
