mod morton_code;

use glam::Vec3;
use glimmer_gpu::{Photon, PhotonIndex};

use self::morton_code::MortonCode;
use crate::BoundingBox;

/// Linear BVH over photons, built as described by Karras in ¹.
///
/// Each leaf holds a single photon, enclosed in a box as large as the build
/// radius.
///
/// ¹ https://devblogs.nvidia.com/wp-content/uploads/2012/11/karras2012hpg_paper.pdf
#[derive(Debug, Default)]
pub struct PhotonBvh {
    nodes: Vec<PhotonBvhNode>,
    radius: f32,
}

#[derive(Clone, Copy, Debug)]
enum PhotonBvhNode {
    Internal {
        bb: BoundingBox,
        left: u32,
        right: u32,
    },

    Leaf {
        bb: BoundingBox,
        photon_id: u32,
    },
}

impl PhotonBvhNode {
    fn bb(&self) -> BoundingBox {
        match self {
            PhotonBvhNode::Internal { bb, .. } => *bb,
            PhotonBvhNode::Leaf { bb, .. } => *bb,
        }
    }
}

impl PhotonIndex for PhotonBvh {
    fn build(photons: &[Photon], radius: f32) -> Self {
        let mut this = Self {
            nodes: Vec::with_capacity(2 * photons.len()),
            radius,
        };

        let scene_bb: BoundingBox = photons
            .iter()
            .map(|photon| photon.position)
            .filter(|position| position.is_finite())
            .collect();

        let mut items: Vec<_> = photons
            .iter()
            .enumerate()
            .filter(|(_, photon)| photon.position.is_finite())
            .map(|(id, photon)| MortonPhoton {
                morton_code: MortonCode::new(scene_bb.map(photon.position)),
                photon_id: id as u32,
            })
            .collect();

        if items.is_empty() {
            return this;
        }

        items.sort_unstable_by_key(|item| item.morton_code);

        this.generate(photons, &items, 0, items.len() - 1);
        this
    }

    fn query(&self, point: Vec3, radius: f32, out: &mut Vec<u32>) {
        if self.nodes.is_empty() {
            return;
        }

        // Leaves are already grown by the build radius, so only the excess
        // has to be accounted for here
        let excess = (radius - self.radius).max(0.0);
        let mut stack = vec![0];

        while let Some(node_id) = stack.pop() {
            let node = self.nodes[node_id as usize];

            if !node.bb().grow(excess).contains(point) {
                continue;
            }

            match node {
                PhotonBvhNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }

                PhotonBvhNode::Leaf { photon_id, .. } => {
                    out.push(photon_id);
                }
            }
        }
    }
}

impl PhotonBvh {
    /// Generates node for photons in `left..=right`, returning its id.
    fn generate(
        &mut self,
        photons: &[Photon],
        items: &[MortonPhoton],
        left: usize,
        right: usize,
    ) -> u32 {
        assert!(left <= right);

        let node_id = self.nodes.len() as u32;

        if left == right {
            let photon_id = items[left].photon_id;
            let position = photons[photon_id as usize].position;

            self.nodes.push(PhotonBvhNode::Leaf {
                bb: BoundingBox::around(position, self.radius),
                photon_id,
            });

            return node_id;
        }

        // Reserve the slot, so that parents always precede their children
        self.nodes.push(PhotonBvhNode::Leaf {
            bb: Default::default(),
            photon_id: 0,
        });

        let split = Self::find_split(items, left, right);
        let left = self.generate(photons, items, left, split);
        let right = self.generate(photons, items, split + 1, right);

        self.nodes[node_id as usize] = PhotonBvhNode::Internal {
            bb: self.nodes[left as usize].bb() + self.nodes[right as usize].bb(),
            left,
            right,
        };

        node_id
    }

    fn find_split(items: &[MortonPhoton], left: usize, right: usize) -> usize {
        let left_code = items[left].morton_code;
        let right_code = items[right].morton_code;

        // Photons sharing the same code can be split anywhere; splitting in
        // the middle keeps the tree balanced
        if left_code == right_code {
            return (left + right) / 2;
        }

        let common_prefix = (left_code ^ right_code).leading_zeros();
        let mut split = left;
        let mut step = right - left;

        loop {
            step = (step + 1) >> 1;

            let middle = split + step;

            if middle < right {
                let middle_code = items[middle].morton_code;
                let middle_prefix = (left_code ^ middle_code).leading_zeros();

                if middle_prefix > common_prefix {
                    split = middle;
                }
            }

            if step <= 1 {
                break;
            }
        }

        split
    }
}

struct MortonPhoton {
    morton_code: MortonCode,
    photon_id: u32,
}
