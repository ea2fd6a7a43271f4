use std::time::{Duration, Instant};

use rand::Rng;

use crate::galaxy::field::PointField;
use crate::galaxy::generator::generate;
use crate::options::Options;
use crate::renderer::FieldDisplay;

/// What a committed options change amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Field-shaping parameters changed; a fresh field was generated and
    /// pushed to the display.
    Regenerated,
    /// Only view-side settings (camera, debug) changed.
    ViewOnly,
    /// The committed options equal the current ones.
    Unchanged,
}

/// Owns the live parameter snapshot and the single resident [`PointField`].
///
/// The session is the only writer of [`Options`] after startup; the control
/// panel edits a copy and hands it back through
/// [`commit_options`](Self::commit_options). Regeneration replaces the
/// previous field wholesale (two fields are never live at once) and the
/// new one is pushed through the [`FieldDisplay`] seam so the session never
/// touches GPU types.
pub struct GalaxySession<R: Rng> {
    options: Options,
    rng: R,
    field: PointField,
    last_generation: Duration,
}

impl<R: Rng> GalaxySession<R> {
    /// Sanitize the options and generate the initial field.
    pub fn new(options: Options, mut rng: R) -> Self {
        let options = options.sanitized();
        let (field, last_generation) = timed_generate(&options, &mut rng);
        Self {
            options,
            rng,
            field,
            last_generation,
        }
    }

    /// The current parameter snapshot.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The resident point field.
    pub fn field(&self) -> &PointField {
        &self.field
    }

    /// How long the most recent generation took.
    pub fn last_generation(&self) -> Duration {
        self.last_generation
    }

    /// Push the resident field to a display (startup wiring).
    pub fn attach(&self, display: &mut dyn FieldDisplay) {
        display.display_field(&self.field, self.options.galaxy.point_size);
    }

    /// Commit an edited options snapshot.
    ///
    /// Values are clamped into range first. If any field-shaping parameter
    /// changed, the old field is discarded, a fresh one is generated and
    /// displayed (superseding the previous GPU buffers); view-only changes
    /// leave the field untouched.
    pub fn commit_options(
        &mut self,
        new: Options,
        display: &mut dyn FieldDisplay,
    ) -> CommitOutcome {
        let new = new.sanitized();
        if new == self.options {
            return CommitOutcome::Unchanged;
        }

        let regenerate = new.galaxy != self.options.galaxy;
        self.options = new;
        if !regenerate {
            return CommitOutcome::ViewOnly;
        }

        let (field, elapsed) = timed_generate(&self.options, &mut self.rng);
        self.field = field;
        self.last_generation = elapsed;
        display.display_field(&self.field, self.options.galaxy.point_size);
        CommitOutcome::Regenerated
    }
}

fn timed_generate<R: Rng>(
    options: &Options,
    rng: &mut R,
) -> (PointField, Duration) {
    let start = Instant::now();
    let field = generate(&options.galaxy, rng);
    let elapsed = start.elapsed();
    log::debug!("generated {} points in {elapsed:?}", field.len());
    (field, elapsed)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::options::GalaxyOptions;

    /// Fake display that models the renderer's replace-on-display buffer
    /// lifecycle: displaying a field releases the previous one.
    #[derive(Default)]
    struct RecordingDisplay {
        displays: usize,
        created: usize,
        released: usize,
        resident: bool,
        last_len: usize,
    }

    impl FieldDisplay for RecordingDisplay {
        fn display_field(&mut self, field: &PointField, _point_size: f32) {
            if self.resident {
                self.released += 1;
            }
            self.created += 1;
            self.resident = true;
            self.displays += 1;
            self.last_len = field.len();
        }
    }

    fn session() -> GalaxySession<StdRng> {
        let options = Options {
            galaxy: GalaxyOptions {
                count: 100,
                ..GalaxyOptions::default()
            },
            ..Options::default()
        };
        GalaxySession::new(options, StdRng::seed_from_u64(11))
    }

    #[test]
    fn new_generates_the_initial_field() {
        let session = session();
        assert_eq!(session.field().len(), 100);
    }

    #[test]
    fn identical_commit_is_a_no_op() {
        let mut session = session();
        let mut display = RecordingDisplay::default();
        let current = session.options().clone();
        let outcome = session.commit_options(current, &mut display);
        assert_eq!(outcome, CommitOutcome::Unchanged);
        assert_eq!(display.displays, 0);
    }

    #[test]
    fn camera_commit_does_not_regenerate() {
        let mut session = session();
        let mut display = RecordingDisplay::default();
        let before = session.field().clone();

        let mut edited = session.options().clone();
        edited.camera.fovy = 60.0;
        let outcome = session.commit_options(edited, &mut display);

        assert_eq!(outcome, CommitOutcome::ViewOnly);
        assert_eq!(display.displays, 0);
        assert_eq!(session.field(), &before);
        assert_eq!(session.options().camera.fovy, 60.0);
    }

    #[test]
    fn galaxy_commit_regenerates_and_displays() {
        let mut session = session();
        let mut display = RecordingDisplay::default();

        let mut edited = session.options().clone();
        edited.galaxy.count = 250;
        let outcome = session.commit_options(edited, &mut display);

        assert_eq!(outcome, CommitOutcome::Regenerated);
        assert_eq!(display.displays, 1);
        assert_eq!(display.last_len, 250);
        assert_eq!(session.field().len(), 250);
    }

    #[test]
    fn commit_sanitizes_before_storing() {
        let mut session = session();
        let mut display = RecordingDisplay::default();

        let mut edited = session.options().clone();
        edited.galaxy.branches = 0;
        edited.galaxy.radius = -1.0;
        let outcome = session.commit_options(edited, &mut display);

        assert_eq!(outcome, CommitOutcome::Regenerated);
        assert_eq!(session.options().galaxy.branches, 1);
        assert_eq!(session.options().galaxy.radius, 0.0);
    }

    #[test]
    fn repeated_commits_keep_one_resident_field() {
        let mut session = session();
        let mut display = RecordingDisplay::default();
        session.attach(&mut display);

        for n in 0..10 {
            let mut edited = session.options().clone();
            edited.galaxy.count = 101 + n;
            let _ = session.commit_options(edited, &mut display);
        }

        assert_eq!(display.displays, 11);
        // Every superseded field was released: never more than one resident.
        assert_eq!(display.created - display.released, 1);
    }
}
