//=========================================================================
// Camera Manager
//=========================================================================
//
// Owns the game's cameras and the single/multi camera policy.
//
// Single-camera mode:
//   - at most one camera may exist (checked when creating)
//   - only the first camera is updated; the camera surface is moved by
//     the negated camera position and canvas layers are offset to match
//
// Multi-camera mode:
//   - any number of cameras; every one is updated, no surface panning
//
// In both modes every camera is rendered, in creation order, which is
// also the z-order.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{Camera, CameraError, CameraId, CameraSurface, LayerRenderer};
use crate::core::math::{Size, Vec2};

/// Name given to the camera created by [`CameraManager::boot`].
pub const DEFAULT_CAMERA_NAME: &str = "defaultCamera";

//=== CameraManager =======================================================

pub struct CameraManager {
    cameras: Vec<Camera>,
    next_id: u32,
    multi_camera_mode: bool,
    default_camera: Option<CameraId>,
    surface: Option<Box<dyn CameraSurface>>,
}

impl CameraManager {
    //--- Construction -----------------------------------------------------

    pub fn new(multi_camera_mode: bool) -> Self {
        debug!("Camera manager created (multi camera mode: {})", multi_camera_mode);
        Self {
            cameras: Vec::new(),
            next_id: 0,
            multi_camera_mode,
            default_camera: None,
            surface: None,
        }
    }

    //--- Mode -------------------------------------------------------------

    pub fn multi_camera_mode(&self) -> bool {
        self.multi_camera_mode
    }

    /// Flips the mode and returns the new value.
    ///
    /// Existing cameras are left as they are: switching to single mode
    /// with several cameras only stops the extra ones from updating.
    pub fn set_multi_camera_mode(&mut self, multi_camera_mode: bool) -> bool {
        if multi_camera_mode != self.multi_camera_mode && self.cameras.len() > 1 {
            warn!(
                "Camera mode changed with {} cameras alive; they are kept",
                self.cameras.len()
            );
        }
        self.multi_camera_mode = multi_camera_mode;
        self.multi_camera_mode
    }

    //--- Boot -------------------------------------------------------------

    /// Creates the default camera spanning `stage_size` and keeps `surface`
    /// for single-camera panning.
    pub fn boot(&mut self, stage_size: Size, surface: Box<dyn CameraSurface>) {
        info!(
            "Booting camera manager ({}x{} stage)",
            stage_size.width, stage_size.height
        );

        self.create(DEFAULT_CAMERA_NAME, Vec2::ZERO, stage_size);
        self.default_camera = self.cameras.first().map(Camera::id);
        self.surface = Some(surface);
    }

    //--- Collection -------------------------------------------------------

    /// Adds a camera and returns its id, or `None` (logged) when the
    /// single-camera cap is reached.
    pub fn create(&mut self, name: &str, position: Vec2, size: Size) -> Option<CameraId> {
        match self.try_create(name, position, size) {
            Ok(id) => Some(id),
            Err(e) => {
                error!("Camera {:?} not created: {}", name, e);
                None
            }
        }
    }

    pub fn try_create(
        &mut self,
        name: &str,
        position: Vec2,
        size: Size,
    ) -> Result<CameraId, CameraError> {
        if !self.multi_camera_mode && !self.cameras.is_empty() {
            return Err(CameraError::SingleCameraLimit);
        }

        let id = CameraId::new(self.next_id);
        self.next_id += 1;

        debug!("Created {} {:?} at ({}, {})", id, name, position.x, position.y);
        self.cameras
            .push(Camera::new(id, name.to_owned(), position, size));

        Ok(id)
    }

    /// Removes the camera with `id`. Returns whether it was present.
    ///
    /// The default camera may be removed too; [`default_camera`]
    /// keeps returning its id afterwards.
    ///
    /// [`default_camera`]: Self::default_camera
    pub fn remove(&mut self, id: CameraId) -> bool {
        let Some(index) = self.cameras.iter().position(|camera| camera.id() == id) else {
            return false;
        };

        let camera = self.cameras.remove(index);
        info!("Removed {} {:?}", id, camera.name());
        true
    }

    /// Drops every camera, the default one included.
    pub fn remove_all(&mut self) {
        info!("Removing all {} cameras", self.cameras.len());
        self.cameras.clear();
    }

    //--- Frame Loop -------------------------------------------------------

    pub fn update(&mut self, layers: &mut dyn LayerRenderer) {
        if self.multi_camera_mode {
            for camera in &mut self.cameras {
                camera.update();
            }
            return;
        }

        let Some(camera) = self.cameras.first_mut() else {
            return;
        };

        camera.update();
        let position = camera.position();

        match self.surface.as_mut() {
            Some(surface) => surface.set_offset(-position.x, -position.y),
            None => trace!("No camera surface to pan"),
        }
        layers.offset_canvas_layers(position.x, position.y);
    }

    pub fn render(&mut self, layers: &mut dyn LayerRenderer) {
        for camera in &mut self.cameras {
            layers.render(camera);
            camera.render();
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn get(&self, id: CameraId) -> Option<&Camera> {
        self.cameras.iter().find(|camera| camera.id() == id)
    }

    pub fn get_mut(&mut self, id: CameraId) -> Option<&mut Camera> {
        self.cameras.iter_mut().find(|camera| camera.id() == id)
    }

    /// Cameras in creation (and render) order.
    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn default_camera(&self) -> Option<CameraId> {
        self.default_camera
    }

    pub fn is_booted(&self) -> bool {
        self.surface.is_some()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    type CallLog = Rc<RefCell<Vec<String>>>;

    #[derive(Default)]
    struct RecordingLayers {
        log: CallLog,
    }

    impl LayerRenderer for RecordingLayers {
        fn render(&mut self, camera: &Camera) {
            self.log.borrow_mut().push(format!("render({})", camera.name()));
        }

        fn offset_canvas_layers(&mut self, x: f32, y: f32) {
            self.log.borrow_mut().push(format!("offset({},{})", x, y));
        }
    }

    struct RecordingSurface {
        log: CallLog,
    }

    impl CameraSurface for RecordingSurface {
        fn set_offset(&mut self, left: f32, top: f32) {
            self.log.borrow_mut().push(format!("surface({},{})", left, top));
        }
    }

    fn booted(multi: bool) -> (CameraManager, CallLog) {
        let log = CallLog::default();
        let mut manager = CameraManager::new(multi);
        manager.boot(
            Size::new(800.0, 600.0),
            Box::new(RecordingSurface {
                log: Rc::clone(&log),
            }),
        );
        (manager, log)
    }

    fn view() -> Size {
        Size::new(200.0, 100.0)
    }

    //--- Boot -------------------------------------------------------------

    #[test]
    fn boot_creates_default_camera_over_stage() {
        let (manager, _) = booted(false);

        assert_eq!(manager.len(), 1);
        assert!(manager.is_booted());
        let id = manager.default_camera().expect("default camera");
        let camera = manager.get(id).expect("default camera alive");
        assert_eq!(camera.name(), DEFAULT_CAMERA_NAME);
        assert_eq!(camera.position(), Vec2::ZERO);
        assert_eq!(camera.size(), Size::new(800.0, 600.0));
        assert_eq!(id.get(), 0);
    }

    //--- Create -----------------------------------------------------------

    #[test]
    fn single_mode_caps_at_one_camera() {
        let (mut manager, _) = booted(false);

        assert_eq!(
            manager.try_create("extra", Vec2::ZERO, view()),
            Err(CameraError::SingleCameraLimit)
        );
        assert!(manager.create("extra", Vec2::ZERO, view()).is_none());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn single_mode_allows_first_camera_before_boot() {
        let mut manager = CameraManager::new(false);
        assert!(manager.create("main", Vec2::ZERO, view()).is_some());
        assert!(manager.create("second", Vec2::ZERO, view()).is_none());
    }

    #[test]
    fn multi_mode_creates_unconditionally_with_fresh_ids() {
        let (mut manager, _) = booted(true);

        let a = manager.create("A", Vec2::ZERO, view()).expect("multi mode");
        let b = manager.create("B", Vec2::ZERO, view()).expect("multi mode");

        assert!(a < b);
        assert_eq!(manager.len(), 3);

        // Ids are not reused after removal
        assert!(manager.remove(b));
        let c = manager.create("C", Vec2::ZERO, view()).expect("multi mode");
        assert!(c > b);
    }

    //--- Remove -----------------------------------------------------------

    #[test]
    fn remove_by_identity() {
        let mut manager = CameraManager::new(true);
        let a = manager.create("A", Vec2::ZERO, view()).expect("multi mode");
        manager.create("B", Vec2::ZERO, view()).expect("multi mode");

        assert!(manager.remove(a));
        let names: Vec<_> = manager.cameras().iter().map(Camera::name).collect();
        assert_eq!(names, vec!["B"]);

        assert!(!manager.remove(a));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn default_camera_can_be_removed() {
        let (mut manager, _) = booted(false);
        let id = manager.default_camera().expect("default camera");

        assert!(manager.remove(id));
        assert!(manager.is_empty());
        assert_eq!(manager.default_camera(), Some(id));
        assert!(manager.get(id).is_none());

        // Slot is free again in single mode
        assert!(manager.create("replacement", Vec2::ZERO, view()).is_some());
    }

    #[test]
    fn remove_all_includes_default_camera() {
        let (mut manager, _) = booted(true);
        manager.create("A", Vec2::ZERO, view());

        manager.remove_all();
        assert!(manager.is_empty());
    }

    //--- Update -----------------------------------------------------------

    #[test]
    fn empty_update_and_render_do_nothing() {
        let log = CallLog::default();
        let mut layers = RecordingLayers { log: Rc::clone(&log) };
        let mut manager = CameraManager::new(false);

        manager.update(&mut layers);
        manager.render(&mut layers);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn single_mode_update_pans_surface_and_layers() {
        let (mut manager, log) = booted(false);
        let mut layers = RecordingLayers { log: Rc::clone(&log) };

        let id = manager.default_camera().expect("default camera");
        manager
            .get_mut(id)
            .expect("default camera alive")
            .pan_by(Vec2::new(30.0, 12.5));

        manager.update(&mut layers);

        assert_eq!(*log.borrow(), vec!["surface(-30,-12.5)", "offset(30,12.5)"]);
        assert_eq!(manager.get(id).map(Camera::update_count), Some(1));
    }

    #[test]
    fn single_mode_update_touches_only_first_camera() {
        let mut manager = CameraManager::new(true);
        let a = manager.create("A", Vec2::ZERO, view()).expect("multi mode");
        let b = manager.create("B", Vec2::ZERO, view()).expect("multi mode");
        manager.set_multi_camera_mode(false);

        manager.update(&mut RecordingLayers::default());

        assert_eq!(manager.get(a).map(Camera::update_count), Some(1));
        assert_eq!(manager.get(b).map(Camera::update_count), Some(0));
    }

    #[test]
    fn multi_mode_update_touches_every_camera_once() {
        let (mut manager, log) = booted(true);
        let mut layers = RecordingLayers { log: Rc::clone(&log) };
        manager.create("A", Vec2::ZERO, view());
        manager.create("B", Vec2::ZERO, view());

        manager.update(&mut layers);

        assert!(manager.cameras().iter().all(|camera| camera.update_count() == 1));
        assert!(log.borrow().is_empty(), "no panning in multi mode");
    }

    //--- Render -----------------------------------------------------------

    #[test]
    fn render_visits_cameras_in_order_layers_first() {
        let (mut manager, log) = booted(true);
        let mut layers = RecordingLayers { log: Rc::clone(&log) };
        manager.create("A", Vec2::ZERO, view());
        manager.create("B", Vec2::ZERO, view());

        manager.render(&mut layers);

        assert_eq!(
            *log.borrow(),
            vec!["render(defaultCamera)", "render(A)", "render(B)"]
        );
        assert!(manager.cameras().iter().all(|camera| camera.render_count() == 1));
    }

    //--- Mode -------------------------------------------------------------

    #[test]
    fn mode_change_keeps_cameras() {
        let (mut manager, _) = booted(true);
        manager.create("A", Vec2::ZERO, view());

        assert!(!manager.set_multi_camera_mode(false));
        assert!(!manager.multi_camera_mode());
        assert_eq!(manager.len(), 2);
        assert!(manager.create("B", Vec2::ZERO, view()).is_none());
    }
}
