/// Human3.6M 17-joint skeleton structure (pairs of joint indices)
/// Defines which joints connect to form the pose skeleton
pub const H36M_LINKS: [[usize; 2]; 16] = [
    [0, 1],   // pelvis to right hip
    [1, 2],   // right hip to right knee
    [2, 3],   // right knee to right ankle
    [0, 4],   // pelvis to left hip
    [4, 5],   // left hip to left knee
    [5, 6],   // left knee to left ankle
    [0, 7],   // pelvis to spine
    [7, 8],   // spine to thorax
    [8, 9],   // thorax to neck base
    [9, 10],  // neck base to head
    [8, 11],  // thorax to left shoulder
    [11, 12], // left shoulder to left elbow
    [12, 13], // left elbow to left wrist
    [8, 14],  // thorax to right shoulder
    [14, 15], // right shoulder to right elbow
    [15, 16], // right elbow to right wrist
];

/// Link color indices mapping to `POSE_COLORS`
/// Mapping: right leg=orange, left leg=blue, torso/head=green, left arm=blue, right arm=orange
pub const H36M_LINK_COLORS: [usize; 16] = [0, 0, 0, 9, 9, 9, 16, 16, 16, 16, 9, 9, 9, 0, 0, 0];

/// Joint color indices mapping to `POSE_COLORS`
/// Mapping: right side=orange, left side=blue, midline=green
pub const H36M_JOINT_COLORS: [usize; 17] = [16, 0, 0, 0, 9, 9, 9, 16, 16, 16, 16, 9, 9, 9, 0, 0, 0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_reference_valid_joints() {
        for &[a, b] in &H36M_LINKS {
            assert!(a < H36M_JOINT_COLORS.len());
            assert!(b < H36M_JOINT_COLORS.len());
        }
        assert_eq!(H36M_LINKS.len(), H36M_LINK_COLORS.len());
    }
}
