//! Landmark storage and detector adapters
//!
//! A [`JointSet`] holds the joints found in one frame. It is filled once at the
//! Landmark Source boundary, either from a detector's indexed landmark buffer
//! ([`extract_joints`]) or from `name → (x, y)` pairs ([`JointSet::from_named`]).
//! Joints the source did not report are simply absent, so every analysis that
//! reads a `JointSet` has to cope with partial sets.

use formcheck_common::{Joint, Point2, MEDIAPIPE_LANDMARK_COUNT};
use log::warn;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// ============================================================================
// JOINT SET
// ============================================================================

/// Joints present in a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JointSet {
    points: [Option<Point2>; Joint::COUNT],
}

impl JointSet {
    /// Create an empty joint set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a joint set from `name → point` pairs
    ///
    /// Unknown joint names are skipped with a warning; later duplicates win.
    pub fn from_named<'a, I, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, P)>,
        P: Into<Point2>,
    {
        let mut set = Self::new();
        for (name, point) in pairs {
            match Joint::from_name(name) {
                Some(joint) => set.insert(joint, point.into()),
                None => warn!("Ignoring unknown joint \"{name}\""),
            }
        }
        set
    }

    /// Set (or replace) a joint position
    pub fn insert(&mut self, joint: Joint, point: Point2) {
        self.points[joint.index()] = Some(point);
    }

    /// Remove a joint, returning its previous position
    pub fn remove(&mut self, joint: Joint) -> Option<Point2> {
        self.points[joint.index()].take()
    }

    /// Builder-style variant of [`JointSet::insert`]
    #[must_use]
    pub fn with(mut self, joint: Joint, point: Point2) -> Self {
        self.insert(joint, point);
        self
    }

    /// Builder-style variant of [`JointSet::remove`]
    #[must_use]
    pub fn without(mut self, joint: Joint) -> Self {
        self.remove(joint);
        self
    }

    #[must_use]
    pub fn get(&self, joint: Joint) -> Option<Point2> {
        self.points[joint.index()]
    }

    #[must_use]
    pub fn contains(&self, joint: Joint) -> bool {
        self.points[joint.index()].is_some()
    }

    /// Look up three joints at once; `None` if any is missing
    #[must_use]
    pub fn triplet(&self, a: Joint, b: Joint, c: Joint) -> Option<(Point2, Point2, Point2)> {
        Some((self.get(a)?, self.get(b)?, self.get(c)?))
    }

    /// Number of joints present
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.iter().all(Option::is_none)
    }

    /// Present joints in `Joint` order
    pub fn iter(&self) -> impl Iterator<Item = (Joint, Point2)> + '_ {
        Joint::ALL
            .iter()
            .filter_map(|&joint| self.get(joint).map(|point| (joint, point)))
    }
}

impl Serialize for JointSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (joint, point) in self.iter() {
            map.serialize_entry(joint.name(), &[point.x, point.y])?;
        }
        map.end()
    }
}

// ============================================================================
// DETECTOR ADAPTER
// ============================================================================

/// Extract the tracked joints from a MediaPipe-indexed landmark buffer
///
/// Each [`Joint`] is read from its fixed index in the 33-point layout. Joints
/// whose index falls outside `raw` are omitted rather than defaulted, so a
/// truncated buffer produces a partial set.
#[must_use]
pub fn extract_joints(raw: &[Point2]) -> JointSet {
    if raw.len() > MEDIAPIPE_LANDMARK_COUNT {
        warn!(
            "Landmark buffer has {} entries (expected {}), extra entries ignored",
            raw.len(),
            MEDIAPIPE_LANDMARK_COUNT
        );
    }

    let mut set = JointSet::new();
    for joint in Joint::ALL {
        if let Some(&point) = raw.get(joint.mediapipe_index()) {
            set.insert(joint, point);
        }
    }
    set
}

// ============================================================================
// FRAME
// ============================================================================

/// What the Landmark Source reported for one frame
#[derive(Debug, Clone, PartialEq)]
pub enum LandmarkFrame {
    /// The detector found no person in the frame
    NoPose,
    /// Joints found in the frame (possibly partial)
    Pose(JointSet),
}

impl LandmarkFrame {
    /// Joint set if a pose was found
    #[must_use]
    pub fn joints(&self) -> Option<&JointSet> {
        match self {
            LandmarkFrame::NoPose => None,
            LandmarkFrame::Pose(joints) => Some(joints),
        }
    }
}

impl From<JointSet> for LandmarkFrame {
    fn from(joints: JointSet) -> Self {
        LandmarkFrame::Pose(joints)
    }
}
