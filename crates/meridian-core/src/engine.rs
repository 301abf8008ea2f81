use std::time::Duration;

use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec3};

use crate::arcs::FlightArc;
use crate::camera::OrbitCamera;
use crate::constants::{
    DEFAULT_POINT_COUNT, PITCH_WOBBLE_AMP, PITCH_WOBBLE_RATE, SPHERE_RADIUS, YAW_RATE,
};
use crate::deform::SurfaceWaves;
use crate::error::EngineError;
use crate::geometry::PointCloud;
use crate::labels::{project_labels, LabelFrame};
use crate::markers::{City, CityMarker};
use crate::scene::{NodeKind, Scene};

/// Engine configuration, fixed for the lifetime of the instance. Cities
/// and connections are reference data; nothing is added or removed while
/// the loop runs.
#[derive(Clone, Debug)]
pub struct GlobeConfig {
    pub surface_width: u32,
    pub surface_height: u32,
    pub point_count: usize,
    pub radius: f32,
    pub cities: Vec<City>,
    /// Connections by city name, resolved to indices at construction.
    pub connections: Vec<(String, String)>,
}

impl GlobeConfig {
    /// The stock globe: a handful of hub cities and the routes between
    /// them. Hosts with their own data swap these lists out wholesale.
    pub fn new(surface_width: u32, surface_height: u32) -> Self {
        let cities = vec![
            City::new("Tokyo", 35.68, 139.69),
            City::new("Singapore", 1.35, 103.82),
            City::new("Dubai", 25.20, 55.27),
            City::new("London", 51.51, -0.13),
            City::new("Paris", 48.86, 2.35),
            City::new("New York", 40.71, -74.01),
            City::new("Los Angeles", 34.05, -118.24),
            City::new("Sao Paulo", -23.55, -46.63),
            City::new("Sydney", -33.87, 151.21),
            City::new("Nairobi", -1.29, 36.82),
        ];
        let connect = |a: &str, b: &str| (a.to_string(), b.to_string());
        let connections = vec![
            connect("Tokyo", "Singapore"),
            connect("Singapore", "Dubai"),
            connect("Dubai", "London"),
            connect("London", "New York"),
            connect("New York", "Los Angeles"),
            connect("Paris", "Sao Paulo"),
            connect("Sydney", "Tokyo"),
            connect("Nairobi", "Paris"),
        ];
        Self {
            surface_width,
            surface_height,
            point_count: DEFAULT_POINT_COUNT,
            radius: SPHERE_RADIUS,
            cities,
            connections,
        }
    }
}

/// Token returned by `start` and required by `stop`. Makes lifecycle
/// ownership explicit: whoever started the engine is the one entitled to
/// stop it, and a stale token from an earlier run is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunHandle {
    generation: u64,
}

/// Owns the frame clock and calls the subsystems in dependency order:
/// deformation, rigid rotation sync, arc visibility and brightness, label
/// projection, camera easing. Rendering is the front-ends' concern; the
/// engine only exposes its buffers.
pub struct GlobeEngine {
    cities: Vec<City>,
    cloud: PointCloud,
    waves: SurfaceWaves,
    scene: Scene,
    markers: Vec<CityMarker>,
    /// Marker anchors under the current group rotation, refreshed by the
    /// group walk each frame; arcs and labels read from here.
    marker_worlds: Vec<Vec3>,
    arcs: Vec<FlightArc>,
    camera: OrbitCamera,
    labels: LabelFrame,

    surface_width: f32,
    surface_height: f32,
    yaw: f32,
    running: bool,
    generation: u64,
}

impl GlobeEngine {
    pub fn new(config: GlobeConfig) -> Result<Self, EngineError> {
        if config.surface_width == 0 || config.surface_height == 0 {
            return Err(EngineError::EmptySurface {
                width: config.surface_width,
                height: config.surface_height,
            });
        }
        if config.cities.is_empty() {
            return Err(EngineError::NoCities);
        }
        let cloud = PointCloud::generate(config.point_count, config.radius)?;

        let mut scene = Scene::new();
        scene.insert(NodeKind::Cloud, true);

        let markers: Vec<CityMarker> = config
            .cities
            .iter()
            .enumerate()
            .map(|(i, city)| {
                scene.insert(NodeKind::Marker(i), true);
                CityMarker::new(i, city)
            })
            .collect();

        // resolve the name pairs once; unknown names are a config error
        let by_name: FnvHashMap<&str, usize> = config
            .cities
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.as_str(), i))
            .collect();
        let mut arcs = Vec::with_capacity(config.connections.len());
        for (index, (from, to)) in config.connections.iter().enumerate() {
            let a = *by_name
                .get(from.as_str())
                .ok_or_else(|| EngineError::UnknownCity { name: from.clone() })?;
            let b = *by_name
                .get(to.as_str())
                .ok_or_else(|| EngineError::UnknownCity { name: to.clone() })?;
            scene.insert(NodeKind::FlightArc(index), true);
            arcs.push(FlightArc::new(
                index,
                (a, b),
                markers[a].anchor,
                markers[b].anchor,
                config.radius,
            ));
        }

        let aspect = config.surface_width as f32 / config.surface_height as f32;
        log::info!(
            "[engine] points={} cities={} connections={} surface={}x{}",
            cloud.len(),
            markers.len(),
            arcs.len(),
            config.surface_width,
            config.surface_height,
        );

        let marker_worlds = markers.iter().map(|m| m.anchor).collect();
        Ok(Self {
            cities: config.cities,
            cloud,
            waves: SurfaceWaves::new(),
            scene,
            markers,
            marker_worlds,
            arcs,
            camera: OrbitCamera::new(aspect),
            labels: LabelFrame::new(),
            surface_width: config.surface_width as f32,
            surface_height: config.surface_height as f32,
            yaw: 0.0,
            running: false,
            generation: 0,
        })
    }

    /// Begin a run. The returned handle is the only way to stop it.
    pub fn start(&mut self) -> RunHandle {
        self.generation += 1;
        self.running = true;
        RunHandle {
            generation: self.generation,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the run the handle belongs to. Safe to call repeatedly and
    /// with stale handles; after the first effective call no tick mutates
    /// anything again.
    pub fn stop(&mut self, handle: &RunHandle) {
        if self.running && handle.generation == self.generation {
            self.running = false;
            self.labels.clear();
            log::info!("[engine] stopped");
        }
    }

    /// Advance one frame. A tick arriving after `stop` (a queued callback
    /// firing late) is a no-op by the running-flag guard.
    pub fn tick(&mut self, dt: Duration) {
        if !self.running {
            return;
        }
        let dt = dt.as_secs_f32();

        // surface deformation and coloring, in the sphere's local frame
        self.waves.advance(dt);
        self.waves.apply(&mut self.cloud);

        // rigid self-rotation shared by cloud, markers, and arcs
        self.yaw += YAW_RATE * dt;
        let pitch = (self.waves.time() * PITCH_WOBBLE_RATE).sin() * PITCH_WOBBLE_AMP;
        let rotation = Quat::from_euler(glam::EulerRot::YXZ, self.yaw, pitch, 0.0);
        self.scene.set_group_rotation(rotation);

        // walk the group and sync each subsystem off its node's transform;
        // markers precede arcs in insertion order, so the world anchors the
        // arcs gate on are already refreshed when they are reached
        let eye = self.camera.eye();
        let time = self.waves.time();
        for node in self.scene.sphere_group() {
            match node.kind {
                // cloud points deform in the local frame; this node's
                // rotation reaches the renderers through the model_view
                NodeKind::Cloud => {}
                NodeKind::Marker(i) => {
                    self.marker_worlds[i] = self.markers[i].world_anchor(node.rotation);
                }
                NodeKind::FlightArc(i) => {
                    let arc = &mut self.arcs[i];
                    let (a, b) = arc.cities;
                    arc.update_visibility(self.marker_worlds[a], self.marker_worlds[b], eye);
                    arc.update_brightness(time);
                }
            }
        }

        // screen-space label records for the overlay adapter
        project_labels(
            &self.markers,
            &self.marker_worlds,
            &self.camera.camera,
            self.surface_width,
            self.surface_height,
            &mut self.labels,
        );

        // camera chases the pointer last, for next frame's parallax
        self.camera.step(dt);
    }

    /// Pointer position in surface pixels; writes the parallax target only.
    pub fn pointer_moved(&mut self, x_px: f32, y_px: f32) {
        self.camera
            .pointer_moved(x_px, y_px, self.surface_width, self.surface_height);
    }

    /// A click fires the deformation impulse. This is the only side effect
    /// the pointer has beyond parallax.
    pub fn clicked(&mut self) {
        self.waves.trigger_impulse();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_width = width as f32;
        self.surface_height = height as f32;
        self.camera.set_aspect(self.surface_width / self.surface_height);
    }

    // ---- buffers the renderers read ----

    #[inline]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    #[inline]
    pub fn positions(&self) -> &[glam::Vec3] {
        &self.cloud.current
    }

    #[inline]
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.cloud.colors
    }

    #[inline]
    pub fn markers(&self) -> &[CityMarker] {
        &self.markers
    }

    #[inline]
    pub fn arcs(&self) -> &[FlightArc] {
        &self.arcs
    }

    #[inline]
    pub fn labels(&self) -> &[crate::labels::LabelPlacement] {
        &self.labels
    }

    #[inline]
    pub fn impulse(&self) -> f32 {
        self.waves.impulse()
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.waves.time()
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        self.scene.group_rotation()
    }

    #[inline]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Clip-space projection for the renderers.
    pub fn projection_matrix(&self) -> Mat4 {
        self.camera.camera.projection_matrix()
    }

    /// Sphere-group model transform folded into the view matrix. Point
    /// sprites billboard in view space, so the renderers take this and the
    /// projection separately rather than one fused matrix.
    pub fn model_view_matrix(&self) -> Mat4 {
        self.camera.camera.view_matrix() * Mat4::from_quat(self.rotation())
    }
}
