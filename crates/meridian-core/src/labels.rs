use glam::{Mat4, Vec3, Vec4};
use smallvec::SmallVec;

use crate::arcs::endpoint_visible;
use crate::camera::Camera;
use crate::markers::CityMarker;

/// Screen placement for one city label, produced fresh every frame. The
/// engine only emits these records; reflecting them onto a DOM overlay or
/// any other UI toolkit is the adapter's job.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
    pub city: usize,
    pub x: f32,
    pub y: f32,
    pub visible: bool,
}

pub type LabelFrame = SmallVec<[LabelPlacement; 8]>;

/// Project every marker into surface pixel coordinates. `worlds` holds the
/// markers' anchors under the current group rotation, refreshed by the
/// frame's group walk. A label is hidden when its marker sits behind the
/// camera (clip w <= 0 or NDC z >= 1) or fails the same camera-facing test
/// that gates the arcs. There is no occlusion test against the sphere body
/// itself, so a hidden-side label that passes the facing test may show
/// through the cloud; that is an accepted approximation of this projector.
pub fn project_labels(
    markers: &[CityMarker],
    worlds: &[Vec3],
    camera: &Camera,
    width: f32,
    height: f32,
    out: &mut LabelFrame,
) {
    out.clear();
    let view_proj: Mat4 = camera.projection_matrix() * camera.view_matrix();
    for (marker, &world) in markers.iter().zip(worlds) {
        let clip = view_proj * Vec4::new(world.x, world.y, world.z, 1.0);

        let behind = clip.w <= 0.0 || clip.z / clip.w >= 1.0;
        let facing = endpoint_visible(world, camera.eye);
        if behind || !facing {
            out.push(LabelPlacement {
                city: marker.city,
                x: 0.0,
                y: 0.0,
                visible: false,
            });
            continue;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        out.push(LabelPlacement {
            city: marker.city,
            x: (ndc_x * 0.5 + 0.5) * width,
            y: (0.5 - ndc_y * 0.5) * height,
            visible: true,
        });
    }
}
