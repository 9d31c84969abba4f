/*!
 * Placement policy for desynchronized right-side entries.
 *
 * After the primary alignment pass, right-side entries whose start time has
 * no exact left-side match are placed through a [`ReferenceIndex`]. The policy looks
 * for a *reference*: the already emitted unit with a left caption whose time
 * interval overlaps the leftover entry the most (earliest unit on ties). The
 * selected [`DesyncMode`] then decides which timing the leftover entry takes.
 * Without a reference every mode keeps the entry's own timing.
 */

use std::fmt;
use std::str::FromStr;

use crate::dual_track::DualEntry;
use crate::errors::MergeError;
use crate::subtitle_processor::SubtitleEntry;
use crate::timestamp::Timestamp;

/// Tie-break policy for desynchronized entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesyncMode {
    /// Adopt the overlapping left caption's timing
    UseLeftTime,
    /// Keep the entry's own timing
    #[default]
    UseRightTime,
    /// Later start and later end of the two
    UseMaxTime,
    /// Earlier start and earlier end of the two
    UseMinTime,
}

impl DesyncMode {
    /// Numeric code used by configuration files (0 = left, 1 = right, 2 = max, 3 = min)
    pub fn code(&self) -> u8 {
        match self {
            Self::UseLeftTime => 0,
            Self::UseRightTime => 1,
            Self::UseMaxTime => 2,
            Self::UseMinTime => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, MergeError> {
        match code {
            0 => Ok(Self::UseLeftTime),
            1 => Ok(Self::UseRightTime),
            2 => Ok(Self::UseMaxTime),
            3 => Ok(Self::UseMinTime),
            other => Err(MergeError::InvalidDesyncMode(other.to_string())),
        }
    }
}

impl TryFrom<i64> for DesyncMode {
    type Error = MergeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for DesyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UseLeftTime => "left",
            Self::UseRightTime => "right",
            Self::UseMaxTime => "max",
            Self::UseMinTime => "min",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for DesyncMode {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "uselefttime" => Ok(Self::UseLeftTime),
            "right" | "userighttime" => Ok(Self::UseRightTime),
            "max" | "usemaxtime" => Ok(Self::UseMaxTime),
            "min" | "usemintime" => Ok(Self::UseMinTime),
            other => other
                .parse::<i64>()
                .map_err(|_| MergeError::InvalidDesyncMode(s.to_string()))
                .and_then(Self::from_code),
        }
    }
}

/// Effective timing chosen for a desynchronized entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub start: Timestamp,
    pub end: Timestamp,
    /// Key of the unit used as reference, if any
    pub reference: Option<Timestamp>,
}

/// Length of the intersection of `[a_start, a_end)` and `[b_start, b_end)`.
/// A zero-length caption overlaps (by zero) an interval containing its instant.
fn overlap(a_start: u64, a_end: u64, b_start: u64, b_end: u64) -> Option<u64> {
    let lo = a_start.max(b_start);
    let hi = a_end.min(b_end);
    let instant_inside = |p: u64, start: u64, end: u64| start <= p && p < end;

    if lo < hi {
        Some(hi - lo)
    } else if (a_start == a_end && instant_inside(a_start, b_start, b_end))
        || (b_start == b_end && instant_inside(b_start, a_start, a_end))
    {
        Some(0)
    } else {
        None
    }
}

/// Left captions of already emitted units, ordered by start time, for
/// repeated reference lookups.
///
/// A lookup only visits spans starting no later than the entry ends and
/// stops once the running maximum of span ends falls before the entry
/// starts, so a merge does not rescan the whole left track per leftover.
#[derive(Debug)]
pub struct ReferenceIndex<'a> {
    units: &'a [DualEntry],

    // (start, end, position in `units`), sorted
    spans: Vec<(u64, u64, usize)>,

    // max_end[i] is the largest end among spans[..=i]
    max_end: Vec<u64>,
}

impl<'a> ReferenceIndex<'a> {
    pub fn new(units: &'a [DualEntry]) -> Self {
        let mut spans: Vec<(u64, u64, usize)> = units
            .iter()
            .enumerate()
            .filter(|(_, unit)| !unit.left.is_empty())
            .map(|(position, unit)| (unit.left.start.as_millis(), unit.left.end.as_millis(), position))
            .collect();
        spans.sort_unstable();

        let max_end = spans
            .iter()
            .scan(0u64, |running, &(_, end, _)| {
                *running = (*running).max(end);
                Some(*running)
            })
            .collect();

        ReferenceIndex { units, spans, max_end }
    }

    /// Unit used as reference for `entry`: the one with a non-empty left
    /// caption overlapping `entry` the most, earliest unit first on ties
    pub fn find(&self, entry: &SubtitleEntry) -> Option<&'a DualEntry> {
        let (start, end) = (entry.start.as_millis(), entry.end.as_millis());
        let upper = self.spans.partition_point(|&(span_start, _, _)| span_start <= end);

        let mut best: Option<(usize, u64)> = None;
        for i in (0..upper).rev() {
            if self.max_end[i] < start {
                break;
            }
            let (span_start, span_end, position) = self.spans[i];
            if let Some(amount) = overlap(start, end, span_start, span_end) {
                let better = match best {
                    None => true,
                    Some((best_position, best_amount)) => {
                        amount > best_amount || (amount == best_amount && position < best_position)
                    }
                };
                if better {
                    best = Some((position, amount));
                }
            }
        }
        best.map(|(position, _)| &self.units[position])
    }

    /// Compute where a desynchronized right-side entry goes
    pub fn resolve(&self, mode: DesyncMode, entry: &SubtitleEntry) -> Placement {
        let Some(reference) = self.find(entry) else {
            return Placement {
                start: entry.start,
                end: entry.end,
                reference: None,
            };
        };
        let (ref_start, ref_end) = (reference.left.start, reference.left.end);

        let (start, end) = match mode {
            DesyncMode::UseLeftTime => (ref_start, ref_end),
            DesyncMode::UseRightTime => (entry.start, entry.end),
            DesyncMode::UseMaxTime => (entry.start.max(ref_start), entry.end.max(ref_end)),
            DesyncMode::UseMinTime => (entry.start.min(ref_start), entry.end.min(ref_end)),
        };

        Placement {
            start,
            end,
            reference: Some(reference.key),
        }
    }
}

/// One-off lookup; see [`ReferenceIndex::find`]
pub fn find_reference<'a>(entry: &SubtitleEntry, units: &'a [DualEntry]) -> Option<&'a DualEntry> {
    ReferenceIndex::new(units).find(entry)
}

/// One-off placement; see [`ReferenceIndex::resolve`]
pub fn resolve_desync(mode: DesyncMode, entry: &SubtitleEntry, units: &[DualEntry]) -> Placement {
    ReferenceIndex::new(units).resolve(mode, entry)
}
