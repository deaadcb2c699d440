//! Raw serde shapes of the pose-sequence artifact.
//!
//! These mirror the JSON emitted by the upstream pose pipeline exactly;
//! validation and conversion into the typed model happen in [`crate::sequence`].

use serde::Deserialize;

/// Tagged dense-array envelope.
///
/// The upstream pipeline serializes dense numeric arrays as
/// `{"__ndarray__": [[r, g, b], ...]}` to distinguish them from plain JSON
/// lists. Deserialization unwraps the marker key and keeps the rows.
#[derive(Debug, Clone, Deserialize)]
pub struct NdArray {
    /// Row-major payload, one row per entry.
    #[serde(rename = "__ndarray__")]
    pub rows: Vec<Vec<f32>>,
}

/// Top-level artifact: skeleton metadata plus one entry per frame.
#[derive(Debug, Deserialize)]
pub struct RawArtifact {
    /// Skeleton topology and color tables.
    pub meta_info: RawMeta,
    /// Per-frame instance records, index = frame number.
    pub instance_info: Vec<RawFrame>,
}

/// Skeleton metadata as stored in the artifact.
#[derive(Debug, Deserialize)]
pub struct RawMeta {
    /// Ordered joint-index pairs defining the skeleton topology.
    pub skeleton_links: Vec<[usize; 2]>,
    /// Per-joint RGB colors in [0, 255], tagged dense array.
    pub keypoint_colors: NdArray,
    /// Per-link RGB colors in [0, 255], tagged dense array.
    pub skeleton_link_colors: NdArray,
}

/// One frame: the persons detected in it.
#[derive(Debug, Deserialize)]
pub struct RawFrame {
    /// Detected persons in detector-assigned order.
    pub instances: Vec<RawInstance>,
}

/// One detected person's pose within a frame.
#[derive(Debug, Deserialize)]
pub struct RawInstance {
    /// 3D keypoint positions, one per joint.
    pub keypoints: Vec<[f32; 3]>,
    /// Confidence scores in [0, 1], index-aligned with `keypoints`.
    pub keypoint_scores: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndarray_envelope_unwrap() {
        let json = r#"{"__ndarray__": [[255, 128, 0], [0, 255, 0]]}"#;
        let arr: NdArray = serde_json::from_str(json).unwrap();
        assert_eq!(arr.rows.len(), 2);
        assert_eq!(arr.rows[0], vec![255.0, 128.0, 0.0]);
    }

    #[test]
    fn test_plain_list_rejected() {
        // A bare list is not a tagged dense array.
        let json = r#"[[255, 128, 0]]"#;
        assert!(serde_json::from_str::<NdArray>(json).is_err());
    }

    #[test]
    fn test_instance_shape() {
        let json = r#"{"keypoints": [[0.1, 0.2, 0.3]], "keypoint_scores": [0.9]}"#;
        let inst: RawInstance = serde_json::from_str(json).unwrap();
        assert_eq!(inst.keypoints.len(), 1);
        assert_eq!(inst.keypoint_scores.len(), 1);
    }
}
