use std::sync::Arc;

use crate::config::MoodConfig;
use crate::mood::apply::{ApplyReport, apply};
use crate::mood::binder::Binder;
use crate::mood::binding::TrackCache;
use crate::mood::blend::BlendState;
use crate::mood::capture::{capture, capture_original};
use crate::mood::state::{CollectionMood, MoodSnapshot, ObjectMood, OriginalState};
use crate::scene::{CollectionHandle, ObjectHandle, Scene};
use crate::timeline::Sequence;

/// Blends a scene toward moods sampled from a sequence.
///
/// # Re-entrancy
///
/// A request arriving while a blend runs first finalizes the running blend
/// (applies its target at alpha 1.0), then is handled like any idle request.
///
/// # Scheduling
///
/// The host calls [`tick`](Self::tick) once per frame while
/// [`wants_tick`](Self::wants_tick) is true. Nothing here blocks.
pub struct MoodBlender {
    sequence: Arc<Sequence>,
    config: MoodConfig,

    track_cache: Option<TrackCache>,
    snapshot: MoodSnapshot,
    blend: BlendState,
    original: OriginalState,

    recapture_countdown: Option<f32>,
}

impl MoodBlender {
    #[must_use]
    pub fn new(sequence: Arc<Sequence>, config: MoodConfig) -> Self {
        Self {
            sequence,
            config,
            track_cache: None,
            snapshot: MoodSnapshot::default(),
            blend: BlendState::new(),
            original: OriginalState::default(),
            recapture_countdown: None,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Caches tracks and consumes the startup time options.
    pub fn on_register(&mut self, scene: &mut Scene) {
        self.cache_tracks(scene);

        let reset = std::mem::take(&mut self.config.reset_time);
        let force_time = std::mem::take(&mut self.config.force_time);

        if reset {
            self.set_mood(scene, 0, true);
        } else if force_time > 0 {
            self.set_mood(scene, force_time, true);
        }
    }

    /// Schedules the one-time startup recapture, if configured.
    pub fn on_game_initialized(&mut self) {
        if self.config.first_recapture_delay > 0.0 {
            log::debug!(
                "Sky recapture scheduled in {:.2}s",
                self.config.first_recapture_delay
            );
            self.recapture_countdown = Some(self.config.first_recapture_delay);
        }
    }

    /// Rebuilds the binding cache from the current scene.
    pub fn cache_tracks(&mut self, scene: &Scene) -> &TrackCache {
        self.track_cache.insert(Binder::resolve(&self.sequence, scene))
    }

    // ========================================================================
    // Mood requests
    // ========================================================================

    /// Requests the mood at `time`.
    ///
    /// Returns true when a change was applied or a blend started. Rejected
    /// requests (out of range, already applied, nothing to change) return
    /// false and leave the scene untouched.
    pub fn set_mood(&mut self, scene: &mut Scene, time: i32, force: bool) -> bool {
        let frame = self.sequence.frame_for_time(time);
        if !self.sequence.contains_frame(frame) {
            log::debug!("Mood time {time} (frame {}) outside playback range", frame.0);
            return false;
        }
        if !force && self.blend.active && self.blend.target_time == Some(time) {
            log::debug!("Mood time {time} already blending");
            return false;
        }

        self.finalize_active(scene);
        if !force && self.blend.current_time == Some(time) {
            log::debug!("Mood time {time} already applied");
            return false;
        }

        // Scene content may have changed since the last request.
        let cache = Binder::resolve(&self.sequence, scene);
        let snapshot = capture(&self.sequence, &cache, scene, frame);
        self.track_cache = Some(cache);
        self.original.record(&snapshot);

        if snapshot.is_empty() {
            log::debug!("Mood time {time} changes nothing");
            self.blend.set_applied(Some(time));
            return false;
        }

        self.start(scene, snapshot, Some(time), force);
        true
    }

    /// Blends every captured property back to the first value it was seen with.
    pub fn restore_original(&mut self, scene: &mut Scene, force: bool) -> bool {
        self.finalize_active(scene);

        let snapshot = capture_original(&self.original, scene);
        if snapshot.is_empty() {
            log::debug!("Nothing to restore");
            return false;
        }

        self.start(scene, snapshot, None, force);
        true
    }

    fn start(&mut self, scene: &mut Scene, snapshot: MoodSnapshot, target: Option<i32>, force: bool) {
        self.snapshot = snapshot;

        let duration = self.config.blend_time;
        let instant = force || !scene.world_type.allows_blending() || duration <= 0.0;
        if !force && duration <= 0.0 {
            log::warn!("Blend time {duration} is not positive, applying instantly");
        }

        if instant {
            let report = apply(scene, &self.snapshot, 1.0);
            self.blend.set_applied(target);
            self.recapture_sky(scene);
            log::debug!(
                "Applied mood {target:?} instantly ({} objects, {} collections)",
                report.objects,
                report.collections
            );
        } else {
            self.blend.begin(target, duration);
            log::debug!(
                "Blending to mood {target:?} over {duration:.2}s ({} properties)",
                self.snapshot.property_count()
            );
        }
    }

    /// Completes the running blend at its exact target.
    fn finalize_active(&mut self, scene: &mut Scene) {
        if !self.blend.active {
            return;
        }
        log::debug!("Finalizing blend to {:?} early", self.blend.target_time);
        apply(scene, &self.snapshot, 1.0);
        self.blend.finish();
        self.recapture_sky(scene);
    }

    // ========================================================================
    // Per-frame
    // ========================================================================

    /// Advances the blend by `dt` seconds and applies it.
    ///
    /// Returns the alpha applied this tick, or `None` when idle.
    pub fn tick(&mut self, scene: &mut Scene, dt: f32) -> Option<f32> {
        if let Some(remaining) = self.recapture_countdown.as_mut() {
            *remaining -= dt.max(0.0);
            if *remaining <= 0.0 {
                self.recapture_countdown = None;
                self.recapture_sky(scene);
            }
        }

        if !self.blend.active {
            return None;
        }

        let alpha = self.blend.advance(dt);
        let report: ApplyReport = apply(scene, &self.snapshot, alpha);
        if report.stale > 0 {
            log::trace!("{} stale object(s) skipped this tick", report.stale);
        }

        let finished = !self.blend.active;
        if self.config.recapture_sky_every_frame || finished {
            self.recapture_sky(scene);
        }
        if finished {
            log::debug!("Blend to mood {:?} complete", self.blend.current_time);
        }

        Some(alpha)
    }

    /// Recaptures the cached sky light now. Returns false when there is none.
    pub fn recapture_sky(&mut self, scene: &mut Scene) -> bool {
        self.track_cache
            .as_ref()
            .and_then(|cache| cache.sky_light)
            .is_some_and(|sky| scene.recapture_sky_light(sky))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Whether the host must keep calling [`tick`](Self::tick).
    #[must_use]
    pub fn wants_tick(&self) -> bool {
        self.blend.active || self.recapture_countdown.is_some()
    }

    #[must_use]
    pub fn is_blending(&self) -> bool {
        self.blend.active
    }

    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.blend.alpha
    }

    #[must_use]
    pub fn current_time(&self) -> Option<i32> {
        self.blend.current_time
    }

    #[must_use]
    pub fn blend_state(&self) -> &BlendState {
        &self.blend
    }

    #[must_use]
    pub fn snapshot(&self) -> &MoodSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn track_cache(&self) -> Option<&TrackCache> {
        self.track_cache.as_ref()
    }

    #[must_use]
    pub fn original_object_state(&self, handle: ObjectHandle) -> Option<&ObjectMood> {
        self.original.objects.get(&handle)
    }

    #[must_use]
    pub fn original_collection_state(&self, handle: CollectionHandle) -> Option<&CollectionMood> {
        self.original.collections.get(&handle)
    }

    #[must_use]
    pub fn config(&self) -> &MoodConfig {
        &self.config
    }

    #[must_use]
    pub fn sequence(&self) -> &Arc<Sequence> {
        &self.sequence
    }
}
