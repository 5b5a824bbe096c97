//! Junction boxes wired into circuits.
//!
//! Boxes are points in 3D space. Pairs are connected closest-first, and
//! connected boxes form a circuit. Part one connects a fixed number of the
//! closest pairs and multiplies the sizes of the three largest circuits;
//! part two keeps connecting until every box is in one circuit and reports
//! the product of the X coordinates of the pair that closed it.

use super::error::PuzzleError;
use super::{numbered_lines, Answers};
use crate::partition::PartitionStore;

/// How many of the largest circuits part one multiplies together.
pub const LARGEST_CIRCUITS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JunctionBox {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

type BoxKey = (i64, i64, i64);

fn box_key(junction: &JunctionBox) -> BoxKey {
    (junction.x, junction.y, junction.z)
}

type Circuits = PartitionStore<JunctionBox, BoxKey, fn(&JunctionBox) -> BoxKey>;

impl JunctionBox {
    /// Squared Euclidean distance. Orders pairs the same way the true
    /// distance does without leaving integers. Widened to `i128` so any pair
    /// of `i64` coordinates fits.
    pub fn squared_distance(&self, other: &JunctionBox) -> i128 {
        let dx = i128::from(self.x) - i128::from(other.x);
        let dy = i128::from(self.y) - i128::from(other.y);
        let dz = i128::from(self.z) - i128::from(other.z);
        dx * dx + dy * dy + dz * dz
    }
}

/// Parses one `x,y,z` box per line.
///
/// # Errors
/// Returns `PuzzleError::MalformedLine` or `PuzzleError::InvalidNumber` for a
/// bad line.
pub fn parse_boxes(input: &str) -> Result<Vec<JunctionBox>, PuzzleError> {
    numbered_lines(input)
        .map(|(line_no, line)| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let [x, y, z] = fields.as_slice() else {
                return Err(PuzzleError::MalformedLine {
                    line: line_no,
                    content: line.to_string(),
                });
            };
            let parse = |field: &str| {
                field
                    .parse::<i64>()
                    .map_err(|source| PuzzleError::InvalidNumber {
                        line: line_no,
                        content: field.to_string(),
                        source,
                    })
            };
            Ok(JunctionBox {
                x: parse(*x)?,
                y: parse(*y)?,
                z: parse(*z)?,
            })
        })
        .collect()
}

/// Every unordered pair of box indices, closest first. Pairs at equal
/// distance keep their enumeration order.
pub fn closest_pairs(boxes: &[JunctionBox]) -> Vec<(usize, usize)> {
    let mut pairs: Vec<(i128, usize, usize)> = Vec::with_capacity(boxes.len() * boxes.len() / 2);
    for (i, a) in boxes.iter().enumerate() {
        for (j, b) in boxes.iter().enumerate().skip(i + 1) {
            pairs.push((a.squared_distance(b), i, j));
        }
    }
    pairs.sort_by_key(|&(distance, _, _)| distance);
    pairs.into_iter().map(|(_, i, j)| (i, j)).collect()
}

fn singleton_circuits(boxes: &[JunctionBox]) -> Result<Circuits, PuzzleError> {
    let mut circuits: Circuits = PartitionStore::new(box_key as fn(&JunctionBox) -> BoxKey);
    for junction in boxes {
        circuits.make_set([*junction])?;
    }
    Ok(circuits)
}

/// Sizes of every circuit after attempting the `connections` closest
/// connections, largest first. A connection between boxes already in the
/// same circuit still counts as an attempt.
///
/// # Errors
/// Fails with `PuzzleError::Partition` when two boxes share coordinates.
pub fn circuit_sizes(
    boxes: &[JunctionBox],
    connections: usize,
) -> Result<Vec<usize>, PuzzleError> {
    let mut circuits = singleton_circuits(boxes)?;
    for (i, j) in closest_pairs(boxes).into_iter().take(connections) {
        circuits.union(&boxes[i], &boxes[j])?;
    }

    let mut sizes: Vec<usize> = circuits.sets().iter().map(Vec::len).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    Ok(sizes)
}

/// The pair whose connection first leaves a single circuit, or `None` when
/// there are fewer than two boxes.
///
/// # Errors
/// Fails with `PuzzleError::Partition` when two boxes share coordinates.
pub fn final_connection(
    boxes: &[JunctionBox],
) -> Result<Option<(JunctionBox, JunctionBox)>, PuzzleError> {
    let mut circuits = singleton_circuits(boxes)?;
    if circuits.set_count() < 2 {
        return Ok(None);
    }
    for (i, j) in closest_pairs(boxes) {
        if circuits.union(&boxes[i], &boxes[j])? && circuits.set_count() == 1 {
            return Ok(Some((boxes[i], boxes[j])));
        }
    }
    Ok(None)
}

/// Product of the X coordinates of two boxes. Signed, and wide enough for
/// any two `i64` values.
pub fn x_product(a: &JunctionBox, b: &JunctionBox) -> i128 {
    i128::from(a.x) * i128::from(b.x)
}

/// Solves both parts for a raw puzzle input.
///
/// # Errors
/// Propagates parse errors and partition errors.
pub fn solve(input: &str, connections: usize) -> Result<Answers, PuzzleError> {
    let boxes = parse_boxes(input)?;

    let part1 = circuit_sizes(&boxes, connections)?
        .into_iter()
        .take(LARGEST_CIRCUITS)
        .map(|size| size as u64)
        .product();
    let part2 = final_connection(&boxes)?.map_or(0, |(a, b)| x_product(&a, &b));

    Ok(Answers { part1, part2 })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "
162,817,812
57,618,57
906,360,560
592,479,940
352,342,300
466,668,158
542,29,236
431,825,988
739,650,466
52,470,668
216,146,977
819,987,18
117,168,530
805,96,715
346,949,466
970,615,88
941,993,340
862,61,35
984,92,344
425,690,689
";

    #[test]
    fn parses_example() {
        let boxes = parse_boxes(EXAMPLE).unwrap();
        assert_eq!(boxes.len(), 20);
        assert_eq!(
            boxes[0],
            JunctionBox {
                x: 162,
                y: 817,
                z: 812
            }
        );
    }

    #[test]
    fn closest_pair_of_example() {
        let boxes = parse_boxes(EXAMPLE).unwrap();
        let (i, j) = closest_pairs(&boxes)[0];
        assert_eq!((boxes[i].x, boxes[j].x), (162, 425));
    }

    #[test]
    fn ten_connections_leave_eleven_circuits() {
        let boxes = parse_boxes(EXAMPLE).unwrap();
        let sizes = circuit_sizes(&boxes, 10).unwrap();
        assert_eq!(sizes.len(), 11);
        assert_eq!(&sizes[..3], &[5, 4, 2]);
        assert_eq!(sizes.iter().sum::<usize>(), 20);
    }

    #[test]
    fn example_answers() {
        assert_eq!(
            solve(EXAMPLE, 10).unwrap(),
            Answers {
                part1: 40,
                part2: 25272
            }
        );
    }

    #[test]
    fn final_connection_needs_two_boxes() {
        let boxes = parse_boxes("1,2,3\n").unwrap();
        assert_eq!(final_connection(&boxes).unwrap(), None);
        assert_eq!(final_connection(&[]).unwrap(), None);
    }

    #[test]
    fn duplicate_boxes_are_rejected() {
        let boxes = parse_boxes("1,2,3\n1,2,3\n").unwrap();
        assert!(matches!(
            circuit_sizes(&boxes, 1),
            Err(PuzzleError::Partition(_))
        ));
    }

    #[test]
    fn far_apart_boxes_do_not_overflow() {
        let boxes = parse_boxes("0,0,0\n4000000000,0,0\n-9223372036854775808,0,0\n").unwrap();
        assert_eq!(
            boxes[1].squared_distance(&boxes[2]),
            (4_000_000_000i128 + 9_223_372_036_854_775_808i128).pow(2)
        );
        assert_eq!(closest_pairs(&boxes)[0], (0, 1));
        assert_eq!(
            solve("0,0,0\n4000000000,0,0\n", 1).unwrap(),
            Answers { part1: 2, part2: 0 }
        );
    }

    #[test]
    fn x_product_keeps_its_sign() {
        assert_eq!(
            solve("-3,0,0\n5,0,0\n", 1).unwrap(),
            Answers {
                part1: 2,
                part2: -15
            }
        );
        let (a, b) = (
            JunctionBox { x: i64::MAX, y: 0, z: 0 },
            JunctionBox { x: i64::MIN, y: 0, z: 0 },
        );
        assert_eq!(x_product(&a, &b), i128::from(i64::MAX) * i128::from(i64::MIN));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(
            parse_boxes("1,2,3\n4,5\n"),
            Err(PuzzleError::MalformedLine { line: 2, .. })
        ));
        assert!(matches!(
            parse_boxes("1,two,3\n"),
            Err(PuzzleError::InvalidNumber { line: 1, .. })
        ));
    }
}
