use caps::{CapChange, CapCommand, CapLayer, CapProjector, CapSet, EditError, RebuildStats};
use runtime::{EventBus, Frame, FrameClock};
use scene::World;
use scene::components::Color;
use scene::entity::EntityId;
use scene::prefabs::{spawn_wireframe_globe, spin_globe};
use tracing::{debug, info, warn};

use crate::camera::Camera;
use crate::config::{Config, ConfigError, Settings};

/// Globe spin per frame while `rotate_sphere` is on (radians).
pub const SPIN_PER_FRAME_RAD: f64 = 0.001;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    CapEdited(CapChange),
    EditRejected(EditError),
    CapsRebuilt(RebuildStats),
    Resized { width: f64, height: f64 },
    SettingsChanged(Settings),
}

/// Headless globe viewer: scene, caps, camera and the frame loop.
///
/// Every cap edit rebuilds the cap geometry before returning, so the next
/// frame always sees a consistent scene.
#[derive(Debug)]
pub struct Viewer {
    world: World,
    globe: EntityId,
    caps: CapSet,
    layer: CapLayer,
    projector: CapProjector,
    camera: Camera,
    settings: Settings,
    clock: FrameClock,
    frame: Frame,
    events: EventBus<ViewerEvent>,
}

impl Viewer {
    pub fn new(config: &Config, width: f64, height: f64) -> Result<Self, ConfigError> {
        let settings = config.resolve_settings()?;
        let radius = config.sphere_radius_km;

        let mut caps = CapSet::new();
        for (index, descriptor) in config.caps.iter().enumerate() {
            caps.apply(CapCommand::Add(Some(*descriptor)))
                .map_err(|source| ConfigError::InvalidCap { index, source })?;
        }

        let mut world = World::new();
        let globe = spawn_wireframe_globe(&mut world, radius, settings.wireframe);
        let mut clock = FrameClock::default();
        let frame = clock.tick();

        let mut viewer = Self {
            world,
            globe,
            caps,
            layer: CapLayer::new(),
            projector: CapProjector::new(radius).with_resolution(config.resolution),
            camera: Camera::for_globe(radius, width, height),
            settings,
            clock,
            frame,
            events: EventBus::new(),
        };
        info!(radius_km = radius, caps = viewer.caps.len(), "viewer initialized");
        viewer.rebuild();
        Ok(viewer)
    }

    /// Applies a cap edit and rebuilds all cap geometry.
    pub fn apply(&mut self, command: CapCommand) -> Result<CapChange, EditError> {
        match self.caps.apply(command) {
            Ok(change) => {
                debug!(?change, "cap edited");
                self.events.emit(self.frame, ViewerEvent::CapEdited(change));
                self.rebuild();
                Ok(change)
            }
            Err(err) => {
                warn!(%err, "cap edit rejected");
                self.events.emit(self.frame, ViewerEvent::EditRejected(err.clone()));
                Err(err)
            }
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.camera.resize(width, height);
        self.events.emit(self.frame, ViewerEvent::Resized { width, height });
    }

    /// Moves the camera along its orbit; the distance is clamped to the orbit
    /// limits.
    pub fn set_camera_distance(&mut self, distance_km: f64) {
        self.camera.set_distance(distance_km);
    }

    pub fn set_rotate_sphere(&mut self, enabled: bool) {
        self.settings.rotate_sphere = enabled;
        self.settings_changed();
    }

    pub fn set_background(&mut self, color: Color) {
        self.settings.background = color;
        self.settings_changed();
    }

    pub fn set_wireframe_color(&mut self, color: Color) {
        self.settings.wireframe = color;
        if let Some(drawable) = self.world.drawable_3d_mut(self.globe) {
            drawable.material.color = color;
        }
        self.settings_changed();
    }

    /// Finishes the current frame and moves on to the next one.
    pub fn advance(&mut self) -> Frame {
        if self.settings.rotate_sphere {
            spin_globe(&mut self.world, self.globe, SPIN_PER_FRAME_RAD);
        }
        self.frame = self.clock.tick();
        self.frame
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn caps(&self) -> &CapSet {
        &self.caps
    }

    pub fn layer(&self) -> &CapLayer {
        &self.layer
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn projector(&self) -> &CapProjector {
        &self.projector
    }

    pub fn events(&self) -> &EventBus<ViewerEvent> {
        &self.events
    }

    /// Current spin of the globe about its polar axis (radians).
    pub fn globe_rotation(&self) -> f64 {
        self.world
            .transform(self.globe)
            .map(|t| t.rotation.angle())
            .unwrap_or(0.0)
    }

    fn rebuild(&mut self) {
        let stats = self.layer.rebuild(&mut self.world, &self.caps, &self.projector);
        self.events.emit(self.frame, ViewerEvent::CapsRebuilt(stats));
    }

    fn settings_changed(&mut self) {
        self.events
            .emit(self.frame, ViewerEvent::SettingsChanged(self.settings));
    }
}

#[cfg(test)]
mod tests {
    use super::{SPIN_PER_FRAME_RAD, Viewer, ViewerEvent};
    use crate::config::{Config, ConfigError};
    use caps::{CapChange, CapCommand, CapDescriptor, CapField, EditError};
    use scene::components::Color;

    fn viewer() -> Viewer {
        Viewer::new(&Config::default(), 1280.0, 720.0).unwrap()
    }

    #[test]
    fn starts_with_initial_caps_rendered() {
        let v = viewer();
        assert_eq!(v.caps().len(), 2);
        assert_eq!(v.layer().len(), 2);
        assert_eq!(v.world().line_groups().len(), 2);
        assert_eq!(v.frame().index, 0);
    }

    #[test]
    fn edit_rebuilds_synchronously() {
        let mut v = viewer();
        let change = v.apply(CapCommand::Add(None)).unwrap();
        assert_eq!(v.layer().len(), 3);
        assert!(v.layer().entity_for(change.cap()).is_some());

        let kinds: Vec<_> = v.events().events().iter().map(|e| &e.payload).collect();
        assert!(matches!(kinds[kinds.len() - 2], ViewerEvent::CapEdited(CapChange::Added(_))));
        assert!(matches!(kinds[kinds.len() - 1], ViewerEvent::CapsRebuilt(s) if s.spawned == 3));
    }

    #[test]
    fn rejected_edit_keeps_geometry() {
        let mut v = viewer();
        let id = v.caps().id_at(0).unwrap();
        let before = v.layer().projected().to_vec();

        let err = v
            .apply(CapCommand::Update(id, CapField::Latitude(91.0)))
            .unwrap_err();
        assert!(matches!(err, EditError::OutOfRange { .. }));
        assert_eq!(v.layer().projected(), before.as_slice());
    }

    #[test]
    fn globe_spins_only_when_enabled() {
        let mut v = viewer();
        v.advance();
        assert_eq!(v.globe_rotation(), 0.0);

        v.set_rotate_sphere(true);
        for _ in 0..10 {
            v.advance();
        }
        assert!((v.globe_rotation() - 10.0 * SPIN_PER_FRAME_RAD).abs() < 1e-9);
        assert_eq!(v.frame().index, 11);
    }

    #[test]
    fn spin_and_resize_leave_caps_alone() {
        let mut v = viewer();
        let before = v.layer().projected().to_vec();
        v.set_rotate_sphere(true);
        v.advance();
        v.resize(640.0, 480.0);

        assert_eq!(v.layer().projected(), before.as_slice());
        assert!((v.camera().aspect - 640.0 / 480.0).abs() < 1e-12);
    }

    #[test]
    fn wireframe_color_updates_globe_material() {
        let mut v = viewer();
        v.set_wireframe_color(Color::RED);
        let globe = v.world().drawables_3d()[0].2;
        assert_eq!(globe.material.color, Color::RED);
        assert_eq!(v.settings().wireframe, Color::RED);
    }

    #[test]
    fn invalid_config_cap_is_reported_with_index() {
        let config = Config {
            caps: vec![
                CapDescriptor::default(),
                CapDescriptor {
                    longitude: 200.0,
                    ..CapDescriptor::default()
                },
            ],
            ..Config::default()
        };
        let err = Viewer::new(&config, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCap { index: 1, .. }));
    }
}
