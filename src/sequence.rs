//! Validated in-memory pose-sequence model.
//!
//! [`PoseSequence::load`] parses a pose-sequence artifact and performs all
//! structural validation up front, so rendering can index frames, persons,
//! joints, and links without re-checking shape invariants.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ndarray::{Array1, Array2};

use crate::artifact::{NdArray, RawArtifact, RawInstance};
use crate::error::{PoseVizError, Result};
use crate::visualizer::Color;
use crate::visualizer::skeleton::{H36M_JOINT_COLORS, H36M_LINK_COLORS, H36M_LINKS};

/// Skeleton topology plus per-joint and per-link color assignment.
#[derive(Debug, Clone)]
pub struct SkeletonMeta {
    /// Ordered joint-index pairs defining bone/limb segments.
    pub links: Vec<(usize, usize)>,
    /// RGB color per joint index, values in [0, 255].
    pub joint_colors: Vec<Color>,
    /// RGB color per link index, same ordering as `links`.
    pub link_colors: Vec<Color>,
}

impl SkeletonMeta {
    /// Standard 17-joint Human3.6M topology with the default palette
    /// coloring. Useful for demos and for synthesizing test sequences.
    #[must_use]
    pub fn h36m() -> Self {
        Self {
            links: H36M_LINKS.iter().map(|&[a, b]| (a, b)).collect(),
            joint_colors: H36M_JOINT_COLORS
                .iter()
                .map(|&i| Color::from_pose_index(i))
                .collect(),
            link_colors: H36M_LINK_COLORS
                .iter()
                .map(|&i| Color::from_pose_index(i))
                .collect(),
        }
    }

    /// Highest joint index referenced by any link, if there are links.
    #[must_use]
    pub fn max_link_joint(&self) -> Option<usize> {
        self.links.iter().map(|&(a, b)| a.max(b)).max()
    }
}

/// One detected person's pose within a frame.
#[derive(Debug, Clone)]
pub struct PersonPose {
    /// Keypoint positions with shape (N, 3).
    pub keypoints: Array2<f32>,
    /// Confidence scores of length N, index-aligned with `keypoints` rows.
    pub scores: Array1<f32>,
}

impl PersonPose {
    /// Number of joints in this pose.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.keypoints.nrows()
    }

    /// Position of joint `i` as `[x, y, z]`.
    #[must_use]
    pub fn point(&self, i: usize) -> [f32; 3] {
        [
            self.keypoints[[i, 0]],
            self.keypoints[[i, 1]],
            self.keypoints[[i, 2]],
        ]
    }

    /// Confidence score of joint `i`.
    #[must_use]
    pub fn score(&self, i: usize) -> f32 {
        self.scores[i]
    }
}

/// All persons detected in a single frame, in detector-assigned order.
#[derive(Debug, Clone, Default)]
pub struct FrameRecord {
    /// One entry per detected person.
    pub instances: Vec<PersonPose>,
}

impl FrameRecord {
    /// Number of persons detected in this frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Check whether no persons were detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// A fully validated pose sequence: skeleton metadata plus per-frame,
/// per-person keypoints and scores. Immutable after load.
#[derive(Debug, Clone)]
pub struct PoseSequence {
    /// Skeleton topology and coloring shared by every frame.
    pub meta: SkeletonMeta,
    /// Ordered frames, index = frame number.
    pub frames: Vec<FrameRecord>,
}

impl PoseSequence {
    /// Load and validate a pose-sequence artifact from a file.
    ///
    /// # Errors
    ///
    /// Returns [`PoseVizError::Io`] if the file cannot be read,
    /// [`PoseVizError::Json`] if it is not valid JSON, and
    /// [`PoseVizError::MalformedArtifact`] on any structural violation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load and validate a pose-sequence artifact from a reader.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`PoseSequence::load`].
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Self::from_json_str(&buf)
    }

    /// Parse and validate a pose-sequence artifact from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`PoseVizError::Json`] if the input is not JSON at all, and
    /// [`PoseVizError::MalformedArtifact`] when required fields are missing
    /// or any shape invariant is violated.
    pub fn from_json_str(json: &str) -> Result<Self> {
        // Syntax errors and shape errors are reported distinctly: a document
        // that parses as JSON but lacks the artifact structure is malformed,
        // not unparseable.
        let value: serde_json::Value = serde_json::from_str(json)?;
        let raw: RawArtifact = serde_json::from_value(value)
            .map_err(|e| PoseVizError::MalformedArtifact(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Number of frames in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check whether the sequence has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Sequence-wide joint count N, or `None` if no person was detected in
    /// any frame.
    #[must_use]
    pub fn joint_count(&self) -> Option<usize> {
        self.frames
            .iter()
            .flat_map(|f| f.instances.first())
            .map(PersonPose::joint_count)
            .next()
    }

    fn from_raw(raw: RawArtifact) -> Result<Self> {
        let meta = SkeletonMeta {
            links: raw
                .meta_info
                .skeleton_links
                .iter()
                .map(|&[a, b]| (a, b))
                .collect(),
            joint_colors: color_table(&raw.meta_info.keypoint_colors, "keypoint_colors")?,
            link_colors: color_table(
                &raw.meta_info.skeleton_link_colors,
                "skeleton_link_colors",
            )?,
        };

        if meta.link_colors.len() != meta.links.len() {
            return Err(PoseVizError::MalformedArtifact(format!(
                "meta_info.skeleton_link_colors has {} entries for {} links",
                meta.link_colors.len(),
                meta.links.len()
            )));
        }
        if let Some(max_joint) = meta.max_link_joint()
            && meta.joint_colors.len() <= max_joint
        {
            return Err(PoseVizError::MalformedArtifact(format!(
                "meta_info.skeleton_links references joint {max_joint}, but \
                 keypoint_colors has only {} entries",
                meta.joint_colors.len()
            )));
        }

        let mut joint_count: Option<usize> = None;
        let mut frames = Vec::with_capacity(raw.instance_info.len());
        for (frame_idx, frame) in raw.instance_info.iter().enumerate() {
            let mut instances = Vec::with_capacity(frame.instances.len());
            for (person_idx, inst) in frame.instances.iter().enumerate() {
                let pose = person_pose(inst, frame_idx, person_idx)?;
                match joint_count {
                    None => joint_count = Some(pose.joint_count()),
                    Some(n) if pose.joint_count() != n => {
                        return Err(PoseVizError::MalformedArtifact(format!(
                            "frame {frame_idx} instance {person_idx} has {} \
                             keypoints, expected {n}",
                            pose.joint_count()
                        )));
                    }
                    Some(_) => {}
                }
                instances.push(pose);
            }
            frames.push(FrameRecord { instances });
        }

        // Topology must be addressable in every person's keypoint array.
        if let (Some(n), Some(max_joint)) = (joint_count, meta.max_link_joint())
            && max_joint >= n
        {
            return Err(PoseVizError::MalformedArtifact(format!(
                "meta_info.skeleton_links references joint {max_joint}, but \
                 poses have {n} joints"
            )));
        }

        // Every joint the renderer may draw needs a color, link or not.
        if let Some(n) = joint_count
            && meta.joint_colors.len() < n
        {
            return Err(PoseVizError::MalformedArtifact(format!(
                "meta_info.keypoint_colors has {} entries, but poses have \
                 {n} joints",
                meta.joint_colors.len()
            )));
        }

        Ok(Self { meta, frames })
    }
}

/// Reshape a tagged dense array into an RGB color table.
fn color_table(arr: &NdArray, field: &str) -> Result<Vec<Color>> {
    arr.rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() != 3 {
                return Err(PoseVizError::MalformedArtifact(format!(
                    "meta_info.{field} row {i} has {} components, expected 3",
                    row.len()
                )));
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let color = Color::new(row[0] as u8, row[1] as u8, row[2] as u8);
            Ok(color)
        })
        .collect()
}

/// Convert one raw instance into a validated [`PersonPose`].
fn person_pose(inst: &RawInstance, frame_idx: usize, person_idx: usize) -> Result<PersonPose> {
    let n = inst.keypoints.len();
    if inst.keypoint_scores.len() != n {
        return Err(PoseVizError::MalformedArtifact(format!(
            "frame {frame_idx} instance {person_idx}: {n} keypoints but {} scores",
            inst.keypoint_scores.len()
        )));
    }

    let flat: Vec<f32> = inst.keypoints.iter().flatten().copied().collect();
    let keypoints = Array2::from_shape_vec((n, 3), flat)
        .map_err(|e| PoseVizError::MalformedArtifact(e.to_string()))?;
    let scores = Array1::from_vec(inst.keypoint_scores.clone());

    Ok(PersonPose { keypoints, scores })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact_json() -> String {
        r#"{
            "meta_info": {
                "skeleton_links": [[0, 2]],
                "keypoint_colors": {"__ndarray__": [[255, 0, 0], [0, 255, 0], [0, 0, 255]]},
                "skeleton_link_colors": {"__ndarray__": [[255, 255, 0]]}
            },
            "instance_info": [
                {"instances": [
                    {"keypoints": [[0.0, 0.0, 0.5], [0.1, 0.1, 1.0], [0.2, 0.0, 1.5]],
                     "keypoint_scores": [0.9, 0.1, 0.5]}
                ]}
            ]
        }"#
        .to_string()
    }

    #[test]
    fn test_round_trip_shape() {
        let seq = PoseSequence::from_json_str(&artifact_json()).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.frames[0].len(), 1);
        assert_eq!(seq.frames[0].instances[0].joint_count(), 3);
        assert_eq!(seq.joint_count(), Some(3));
        assert_eq!(seq.meta.links, vec![(0, 2)]);
    }

    #[test]
    fn test_score_length_mismatch_rejected() {
        let json = artifact_json().replace("[0.9, 0.1, 0.5]", "[0.9, 0.1]");
        let err = PoseSequence::from_json_str(&json).unwrap_err();
        assert!(matches!(err, PoseVizError::MalformedArtifact(_)));
        assert!(err.to_string().contains("frame 0 instance 0"));
    }

    #[test]
    fn test_link_out_of_range_rejected() {
        let json = artifact_json().replace("[[0, 2]]", "[[0, 7]]");
        let err = PoseSequence::from_json_str(&json).unwrap_err();
        assert!(matches!(err, PoseVizError::MalformedArtifact(_)));
        assert!(err.to_string().contains("joint 7"));
    }

    #[test]
    fn test_color_table_shorter_than_joint_count_rejected() {
        // Links stay within the 2-entry color table, but the poses carry a
        // third joint that would have no color to draw with.
        let json = r#"{
            "meta_info": {
                "skeleton_links": [[0, 1]],
                "keypoint_colors": {"__ndarray__": [[255, 0, 0], [0, 255, 0]]},
                "skeleton_link_colors": {"__ndarray__": [[255, 255, 0]]}
            },
            "instance_info": [
                {"instances": [
                    {"keypoints": [[0.0, 0.0, 0.5], [0.1, 0.1, 1.0], [0.2, 0.0, 1.5]],
                     "keypoint_scores": [0.9, 0.8, 0.7]}
                ]}
            ]
        }"#;
        let err = PoseSequence::from_json_str(json).unwrap_err();
        assert!(matches!(err, PoseVizError::MalformedArtifact(_)));
        assert!(err.to_string().contains("keypoint_colors has 2 entries"));
        assert!(err.to_string().contains("3 joints"));
    }

    #[test]
    fn test_link_color_count_mismatch_rejected() {
        let json = artifact_json().replace(
            r#""skeleton_link_colors": {"__ndarray__": [[255, 255, 0]]}"#,
            r#""skeleton_link_colors": {"__ndarray__": [[255, 255, 0], [0, 255, 255]]}"#,
        );
        let err = PoseSequence::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("skeleton_link_colors"));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let json = artifact_json().replace("instance_info", "frames");
        let err = PoseSequence::from_json_str(&json).unwrap_err();
        assert!(matches!(err, PoseVizError::MalformedArtifact(_)));
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let err = PoseSequence::from_json_str("not json").unwrap_err();
        assert!(matches!(err, PoseVizError::Json(_)));
    }

    #[test]
    fn test_joint_count_drift_rejected() {
        let json = r#"{
            "meta_info": {
                "skeleton_links": [],
                "keypoint_colors": {"__ndarray__": [[255, 0, 0]]},
                "skeleton_link_colors": {"__ndarray__": []}
            },
            "instance_info": [
                {"instances": [{"keypoints": [[0, 0, 0]], "keypoint_scores": [1.0]}]},
                {"instances": [{"keypoints": [[0, 0, 0], [1, 1, 1]],
                                "keypoint_scores": [1.0, 1.0]}]}
            ]
        }"#;
        let err = PoseSequence::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("frame 1 instance 0"));
    }

    #[test]
    fn test_h36m_meta_consistent() {
        let meta = SkeletonMeta::h36m();
        assert_eq!(meta.links.len(), meta.link_colors.len());
        let max_joint = meta.max_link_joint().unwrap();
        assert!(meta.joint_colors.len() > max_joint);
        assert_eq!(meta.joint_colors.len(), 17);
    }
}
