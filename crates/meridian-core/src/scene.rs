use glam::Quat;

/// Index of a node in the scene arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// What a node renders as. The renderable payloads themselves (point
/// buffers, arc samples, disc meshes) live with their subsystems; the
/// arena only tracks identity and the rigid transform shared per group.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Cloud,
    Marker(usize),
    FlightArc(usize),
}

#[derive(Copy, Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub rotation: Quat,
}

/// Flat arena of renderable nodes. The sphere, its markers, and its arcs
/// all rotate rigidly together, so instead of a transform hierarchy there
/// is a single group whose rotation is written once per frame.
pub struct Scene {
    nodes: Vec<Node>,
    sphere_group: Vec<NodeId>,
    group_rotation: Quat,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            sphere_group: Vec::new(),
            group_rotation: Quat::IDENTITY,
        }
    }

    pub fn insert(&mut self, kind: NodeKind, in_sphere_group: bool) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            rotation: Quat::IDENTITY,
        });
        if in_sphere_group {
            self.sphere_group.push(id);
        }
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Apply one rigid rotation to every node in the sphere group. Called
    /// exactly once per frame by the orchestrator.
    pub fn set_group_rotation(&mut self, rotation: Quat) {
        self.group_rotation = rotation;
        for id in &self.sphere_group {
            self.nodes[id.0 as usize].rotation = rotation;
        }
    }

    /// The sphere group's nodes, in insertion order. The frame loop walks
    /// these to sync each subsystem off its node's transform.
    pub fn sphere_group(&self) -> impl Iterator<Item = &Node> + '_ {
        self.sphere_group.iter().map(|id| &self.nodes[id.0 as usize])
    }

    /// The rotation shared by the sphere group this frame.
    #[inline]
    pub fn group_rotation(&self) -> Quat {
        self.group_rotation
    }
}
