//! Per-frame orchestration: pointer ray -> nearest hit -> bounce segment.

use glam::Vec3;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    camera::Camera,
    error::GeometryError,
    intersection::Intersection,
    proximity::{ColorDirective, RangeCheck},
    ray::Ray,
    reflection::reflect,
    renderer::{Renderer, SegmentKind},
    scene::Scene,
    segment::Segment,
    utils::clamp_non_negative,
    vector::{add, normalize, scale, subtract},
};

pub const DEFAULT_BOUNCE_LENGTH: f32 = 5.0;

/// Live scalars the driver reads every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSettings {
    /// Length of the drawn reflected segment.
    pub bounce_length: f32,
    /// Fixed laser source. When unset the incident segment starts at the
    /// pointer ray's origin.
    pub emitter: Option<Vec3>,
}

impl Default for FrameSettings {
    fn default() -> FrameSettings {
        FrameSettings {
            bounce_length: DEFAULT_BOUNCE_LENGTH,
            emitter: None,
        }
    }
}

impl FrameSettings {
    pub fn new(bounce_length: f32, emitter: Option<Vec3>) -> FrameSettings {
        let mut settings = FrameSettings {
            bounce_length: DEFAULT_BOUNCE_LENGTH,
            emitter,
        };
        settings.set_bounce_length(bounce_length);
        return settings;
    }

    /// Clamps a negative bounce length to zero.
    pub fn sanitized(mut self) -> FrameSettings {
        self.set_bounce_length(self.bounce_length);
        return self;
    }

    pub fn set_bounce_length(&mut self, bounce_length: f32) {
        self.bounce_length = clamp_non_negative("bounce length", bounce_length);
    }
}

/// Owns at most one drawn segment.
///
/// Replacing draws the new segment first, then releases the old handle and
/// swaps, so the slot never holds a released handle and never drops a live one.
#[derive(Debug)]
pub struct SegmentSlot<H> {
    handle: Option<H>,
    segment: Option<Segment>,
}

impl<H> Default for SegmentSlot<H> {
    fn default() -> SegmentSlot<H> {
        SegmentSlot {
            handle: None,
            segment: None,
        }
    }
}

impl<H> SegmentSlot<H> {
    pub fn replace<R>(&mut self, renderer: &mut R, kind: SegmentKind, segment: Segment)
    where
        R: Renderer<Handle = H>,
    {
        let fresh = renderer.draw_segment(kind, segment);
        if let Some(old) = self.handle.replace(fresh) {
            renderer.release_segment(old);
        }
        self.segment = Some(segment);
    }

    /// Releases the drawn segment, if any. Clearing an empty slot is a no-op.
    pub fn clear<R>(&mut self, renderer: &mut R)
    where
        R: Renderer<Handle = H>,
    {
        if let Some(old) = self.handle.take() {
            renderer.release_segment(old);
        }
        self.segment = None;
    }

    pub fn segment(&self) -> Option<Segment> {
        self.segment
    }

    pub fn is_drawn(&self) -> bool {
        self.handle.is_some()
    }
}

/// What one tick computed and emitted.
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub ray: Ray,
    pub hit: Option<Intersection>,
    pub incident: Option<Segment>,
    pub bounce: Option<Segment>,
    pub reflected: Option<Vec3>,
    pub indicator: ColorDirective,
    /// The bounce was skipped because of a degenerate direction or normal.
    pub skipped: bool,
}

/// Explicit context for the frame loop: scene, live settings, and the
/// handles of the two lines currently on screen.
///
/// Settings and the range check are only reachable through the clamping
/// setters below.
#[derive(Debug)]
pub struct FrameDriver<H> {
    scene: Scene,
    settings: FrameSettings,
    range: RangeCheck,
    incident: SegmentSlot<H>,
    bounce: SegmentSlot<H>,
    frame: u64,
    domain_errors: u64,
}

impl<H> FrameDriver<H> {
    pub fn new(scene: Scene, settings: FrameSettings, range: RangeCheck) -> FrameDriver<H> {
        FrameDriver {
            scene,
            settings: settings.sanitized(),
            range: range.sanitized(),
            incident: SegmentSlot::default(),
            bounce: SegmentSlot::default(),
            frame: 0,
            domain_errors: 0,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of frames whose bounce was skipped on a degenerate direction or normal.
    pub fn domain_errors(&self) -> u64 {
        self.domain_errors
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn settings(&self) -> &FrameSettings {
        &self.settings
    }

    pub fn range(&self) -> &RangeCheck {
        &self.range
    }

    pub fn set_bounce_length(&mut self, bounce_length: f32) {
        self.settings.set_bounce_length(bounce_length);
    }

    pub fn set_emitter(&mut self, emitter: Option<Vec3>) {
        self.settings.emitter = emitter;
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.range.set_threshold(threshold);
    }

    pub fn set_object_radius(&mut self, radius: f32) {
        self.range.set_object_radius(radius);
    }

    pub fn set_object_pos(&mut self, pos: Vec3) {
        self.range.set_object_pos(pos);
    }

    pub fn incident(&self) -> Option<Segment> {
        self.incident.segment()
    }

    pub fn bounce(&self) -> Option<Segment> {
        self.bounce.segment()
    }

    /// Step 1 of a tick: unproject the pointer through `camera`.
    pub fn tick_pointer<R>(&mut self, camera: &Camera, x: f32, y: f32, renderer: &mut R) -> FrameReport
    where
        R: Renderer<Handle = H>,
    {
        let ray = camera.pointer_ray(x, y);
        return self.tick(&ray, renderer);
    }

    /**
     * Runs one frame for `ray`.
     *
     * A miss clears both lines. A hit redraws the incident line and, unless
     * the incoming direction or the surface normal is degenerate, the bounce.
     * A degenerate frame clears the stale bounce and is otherwise ignored.
     * The indicator color is re-evaluated every frame.
     */
    pub fn tick<R>(&mut self, ray: &Ray, renderer: &mut R) -> FrameReport
    where
        R: Renderer<Handle = H>,
    {
        self.frame += 1;

        let hit = self.scene.intersect(ray);
        let mut report = FrameReport {
            frame: self.frame,
            ray: *ray,
            hit,
            incident: None,
            bounce: None,
            reflected: None,
            indicator: ColorDirective::Default,
            skipped: false,
        };

        match hit {
            Some(hit) => {
                let source = self.settings.emitter.unwrap_or(ray.origin);
                let incident = Segment::new(source, hit.pos);
                self.incident.replace(renderer, SegmentKind::Incident, incident);
                report.incident = Some(incident);

                match self.bounce_segment(source, &hit) {
                    Ok((dir, segment)) => {
                        self.bounce.replace(renderer, SegmentKind::Bounce, segment);
                        report.bounce = Some(segment);
                        report.reflected = Some(dir);
                    },
                    Err(err) => {
                        self.note_domain_error(err);
                        self.bounce.clear(renderer);
                        report.skipped = true;
                    },
                }
            },
            None => {
                self.incident.clear(renderer);
                self.bounce.clear(renderer);
            },
        }

        let color = self.range.evaluate();
        renderer.set_indicator(color);
        report.indicator = color;

        return report;
    }

    /// Releases whatever is still drawn.
    pub fn clear<R>(&mut self, renderer: &mut R)
    where
        R: Renderer<Handle = H>,
    {
        self.incident.clear(renderer);
        self.bounce.clear(renderer);
    }

    fn bounce_segment(&self, source: Vec3, hit: &Intersection) -> Result<(Vec3, Segment), GeometryError> {
        let incoming = normalize(subtract(hit.pos, source))?;
        let nrm = normalize(hit.nrm)?;
        let dir = reflect(incoming, nrm);
        let end = add(hit.pos, scale(dir, self.settings.bounce_length));
        return Ok((dir, Segment::new(hit.pos, end)));
    }

    /// Warns on the first degenerate frame, logs the rest at debug level.
    fn note_domain_error(&mut self, err: GeometryError) {
        self.domain_errors += 1;
        if self.domain_errors == 1 {
            warn!("frame {}: bounce skipped: {}", self.frame, err);
        } else {
            debug!("frame {}: bounce skipped: {}", self.frame, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        plane::Plane,
        renderer::{SegmentHandle, SegmentLog},
        sphere::Sphere,
        utils::approx_eq,
    };
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::cell::RefCell;

    thread_local! {
        static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
    }

    /// Collects this module's records per test thread.
    struct CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.target() == "raybounce::frame"
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;

    fn capture_logs() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
        RECORDS.with(|r| r.borrow_mut().clear());
    }

    fn skipped_levels() -> Vec<Level> {
        RECORDS.with(|r| {
            r.borrow()
                .iter()
                .filter(|(_, msg)| msg.contains("bounce skipped"))
                .map(|(level, _)| *level)
                .collect()
        })
    }

    #[derive(Debug)]
    struct Flat;

    impl crate::intersection::Surface for Flat {
        fn intersect(&self, ray: &Ray) -> Option<Intersection> {
            Some(Intersection { t: 1.0, pos: ray.at(1.0), nrm: Vec3::ZERO })
        }
    }

    fn flat_driver() -> FrameDriver<SegmentHandle> {
        let mut scene = Scene::new();
        scene.add(Box::new(Flat));
        FrameDriver::new(scene, FrameSettings::default(), RangeCheck::default())
    }

    fn mirror_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add(Box::new(Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Some(10.0)).unwrap()));
        scene
    }

    fn driver(emitter: Option<Vec3>) -> FrameDriver<SegmentHandle> {
        FrameDriver::new(mirror_scene(), FrameSettings::new(5.0, emitter), RangeCheck::default())
    }

    #[test]
    fn test_tick_head_on_bounce() {
        let mut drv = driver(None);
        let mut log = SegmentLog::new();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));

        let report = drv.tick(&ray, &mut log);
        let hit = report.hit.unwrap();
        assert!(approx_eq(hit.pos, Vec3::new(0.0, 0.0, -5.0), 1e-5));
        assert_eq!(report.incident.unwrap(), Segment::new(ray.origin, hit.pos));
        assert!(approx_eq(report.reflected.unwrap(), Vec3::Z, 1e-6));

        let bounce = report.bounce.unwrap();
        assert_eq!(bounce.start, hit.pos);
        assert!(approx_eq(bounce.end, Vec3::ZERO, 1e-5));
        assert_eq!(log.live_count(), 2);
        assert_eq!(log.live(SegmentKind::Bounce), Some(bounce));
    }

    #[test]
    fn test_tick_oblique_bounce() {
        let mut drv = driver(None);
        let mut log = SegmentLog::new();
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 5.0), Vec3::new(1.0, 0.0, -1.0).normalize());

        let report = drv.tick(&ray, &mut log);
        let s = std::f32::consts::FRAC_1_SQRT_2;
        assert!(approx_eq(report.hit.unwrap().pos, Vec3::new(5.0, 0.0, -5.0), 1e-4));
        assert!(approx_eq(report.reflected.unwrap(), Vec3::new(s, 0.0, s), 1e-5));
        assert!((report.bounce.unwrap().length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_tick_uses_emitter() {
        let mut drv = driver(Some(Vec3::new(0.0, 0.0, 5.0)));
        let mut log = SegmentLog::new();
        // the pointer ray comes in at an angle; the laser still fires from the emitter
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 5.0), Vec3::new(1.0, 0.0, -2.0).normalize());

        let report = drv.tick(&ray, &mut log);
        let hit = report.hit.unwrap();
        assert_eq!(report.incident.unwrap().start, Vec3::new(0.0, 0.0, 5.0));
        let expected = reflect((hit.pos - Vec3::new(0.0, 0.0, 5.0)).normalize(), Vec3::Z);
        assert!(approx_eq(report.reflected.unwrap(), expected, 1e-5));
    }

    #[test]
    fn test_tick_miss_clears() {
        let mut drv = driver(None);
        let mut log = SegmentLog::new();
        let hit_ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let miss_ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);

        drv.tick(&hit_ray, &mut log);
        let report = drv.tick(&miss_ray, &mut log);
        assert!(report.hit.is_none());
        assert!(report.bounce.is_none());
        assert_eq!(log.live_count(), 0);
        assert!(drv.incident().is_none() && drv.bounce().is_none());

        // clearing again is a no-op
        drv.tick(&miss_ray, &mut log);
        assert_eq!(log.created, log.released);
        assert_eq!(drv.frame(), 3);
    }

    #[test]
    fn test_tick_replaces_segments() {
        let mut drv = driver(None);
        let mut log = SegmentLog::new();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        for _ in 0..10 {
            drv.tick(&ray, &mut log);
            assert_eq!(log.live_count(), 2);
        }
        assert_eq!(log.created, 20);
        assert_eq!(log.released, 18);

        drv.clear(&mut log);
        assert_eq!(log.released, 20);
    }

    #[test]
    fn test_tick_degenerate_normal_skips_bounce() {
        let mut drv = flat_driver();
        let mut log = SegmentLog::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        for _ in 0..3 {
            let report = drv.tick(&ray, &mut log);
            assert!(report.skipped);
            assert!(report.bounce.is_none());
            assert!(report.incident.is_some());
        }
        assert_eq!(log.live_count(), 1);
        assert!(log.live(SegmentKind::Bounce).is_none());
        assert_eq!(drv.domain_errors(), 3);
    }

    #[test]
    fn test_domain_error_warns_once_then_debug() {
        capture_logs();
        let mut drv = flat_driver();
        let mut log = SegmentLog::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(drv.domain_errors(), 0);
        drv.tick(&ray, &mut log);
        assert_eq!(drv.domain_errors(), 1);
        for _ in 0..2 {
            drv.tick(&ray, &mut log);
        }
        assert_eq!(drv.domain_errors(), 3);
        assert_eq!(skipped_levels(), vec![Level::Warn, Level::Debug, Level::Debug]);

        // a fresh driver warns again
        capture_logs();
        let mut other = flat_driver();
        other.tick(&ray, &mut log);
        assert_eq!(skipped_levels(), vec![Level::Warn]);
    }

    #[test]
    fn test_clean_frames_leave_domain_errors_alone() {
        let mut drv = driver(None);
        let mut log = SegmentLog::new();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        for _ in 0..5 {
            drv.tick(&ray, &mut log);
        }
        assert_eq!(drv.domain_errors(), 0);
    }

    #[test]
    fn test_tick_hit_at_emitter_skips_bounce() {
        let mut scene = Scene::new();
        scene.add(Box::new(Sphere::new(Vec3::ZERO, 1.0)));
        // the emitter sits exactly on the sphere's surface where the ray hits
        let mut drv: FrameDriver<SegmentHandle> =
            FrameDriver::new(scene, FrameSettings::new(5.0, Some(Vec3::new(0.0, 0.0, 1.0))), RangeCheck::default());
        let mut log = SegmentLog::new();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));

        let report = drv.tick(&ray, &mut log);
        assert!(report.skipped);
        assert!(report.hit.is_some());
    }

    #[test]
    fn test_tick_indicator_follows_range() {
        let mut drv = driver(None);
        let mut log = SegmentLog::new();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);

        drv.set_object_pos(Vec3::new(2.4, 0.0, 0.0));
        assert_eq!(drv.tick(&ray, &mut log).indicator, ColorDirective::Alert);
        assert_eq!(log.indicator, ColorDirective::Alert);

        drv.set_object_pos(Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(drv.tick(&ray, &mut log).indicator, ColorDirective::Default);
        assert_eq!(log.indicator, ColorDirective::Default);
    }

    #[test]
    fn test_tick_pointer_through_camera() {
        let mut drv = driver(None);
        let mut log = SegmentLog::new();
        let camera = Camera::from_lookat(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, 50.0, 800.0, 600.0);

        let report = drv.tick_pointer(&camera, 400.0, 300.0, &mut log);
        assert!(approx_eq(report.hit.unwrap().pos, Vec3::new(0.0, 0.0, -5.0), 1e-4));
        assert!(approx_eq(report.reflected.unwrap(), Vec3::Z, 1e-5));
    }

    #[test]
    fn test_driver_setters_clamp() {
        let mut drv = driver(None);
        drv.set_bounce_length(-1.0);
        drv.set_threshold(-2.0);
        drv.set_object_radius(f32::NAN);
        assert_eq!(drv.settings().bounce_length, 0.0);
        assert_eq!(drv.range().threshold, 0.0);
        assert_eq!(drv.range().object_radius, 0.0);

        // settings handed to the constructor go through the same clamp
        let raw = FrameSettings {
            bounce_length: -4.0,
            emitter: None,
        };
        let drv: FrameDriver<SegmentHandle> = FrameDriver::new(mirror_scene(), raw, RangeCheck::default());
        assert_eq!(drv.settings().bounce_length, 0.0);
    }

    #[test]
    fn test_driver_bounce_length_and_emitter_live() {
        let mut drv = driver(None);
        let mut log = SegmentLog::new();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));

        drv.set_bounce_length(2.0);
        let bounce = drv.tick(&ray, &mut log).bounce.unwrap();
        assert!((bounce.length() - 2.0).abs() < 1e-5);

        drv.set_emitter(Some(Vec3::new(0.0, 0.0, 3.0)));
        let report = drv.tick(&ray, &mut log);
        assert_eq!(report.incident.unwrap().start, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(drv.settings().emitter, Some(Vec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn test_settings_clamp() {
        let mut settings = FrameSettings::new(-3.0, None);
        assert_eq!(settings.bounce_length, 0.0);
        settings.set_bounce_length(2.0);
        assert_eq!(settings.bounce_length, 2.0);
    }
}
