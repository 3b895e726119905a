//! Looping playback of the current click.
//!
//! A [`PlaybackSession`] owns the player and the settings it renders from.
//! Changing settings re-renders the click and, while playing, swaps the
//! looped buffer: the old loop is stopped before the new one starts, so at
//! most one buffer is ever playing.

use log::{debug, warn};

use crate::click::{render_click, ClickParams};
use crate::error::{DspError, DspResult};
use crate::rng::{create_rng, derive_click_seed};
use crate::settings::ClickSettings;

/// Audio output that loops a WAV buffer until stopped.
pub trait ClickPlayer {
    /// Starts looping `wav`. Any previous loop has already been stopped.
    fn play_looped(&mut self, wav: &[u8]) -> Result<(), String>;

    /// Stops the current loop. Stopping an idle player is a no-op.
    fn stop(&mut self);
}

/// Play/pause state plus the click currently loaded into a [`ClickPlayer`].
#[derive(Debug)]
pub struct PlaybackSession<P: ClickPlayer> {
    player: P,
    settings: ClickSettings,
    sample_rate: u32,
    gain: f32,
    base_seed: u32,
    renders: u64,
    current: Option<Vec<u8>>,
    playing: bool,
}

impl<P: ClickPlayer> PlaybackSession<P> {
    /// Creates a paused session with a random base seed.
    pub fn new(player: P, settings: ClickSettings, sample_rate: u32, gain: f32) -> Self {
        Self::with_seed(player, settings, sample_rate, gain, rand::random())
    }

    /// Creates a paused session whose clicks are reproducible from `seed`.
    pub fn with_seed(
        player: P,
        settings: ClickSettings,
        sample_rate: u32,
        gain: f32,
        seed: u32,
    ) -> Self {
        Self {
            player,
            settings,
            sample_rate,
            gain,
            base_seed: seed,
            renders: 0,
            current: None,
            playing: false,
        }
    }

    /// Settings the next click is rendered from.
    pub fn settings(&self) -> &ClickSettings {
        &self.settings
    }

    /// Whether the player is looping a click.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The most recently rendered WAV buffer.
    pub fn current_buffer(&self) -> Option<&[u8]> {
        self.current.as_deref()
    }

    /// The underlying player.
    pub fn player(&self) -> &P {
        &self.player
    }

    /// Consumes the session, returning the player.
    pub fn into_player(self) -> P {
        self.player
    }

    /// Switches between playing and paused.
    ///
    /// Starting always renders a fresh click. Returns the new play state.
    ///
    /// # Errors
    /// Any render error, or `Playback` when the player rejects the buffer.
    /// The session stays paused on error.
    pub fn toggle(&mut self) -> DspResult<bool> {
        if self.playing {
            self.player.stop();
            self.playing = false;
            debug!("playback paused");
        } else {
            let params = self.settings.to_params(self.sample_rate, self.gain)?;
            let wav = self.render(&params)?;
            self.current = Some(wav);
            self.start()?;
        }
        Ok(self.playing)
    }

    /// Stores new settings and re-renders the click, swapping it in while
    /// playing.
    ///
    /// A render that yields no usable signal is logged and skipped, keeping
    /// the previous buffer (and loop) in place.
    ///
    /// # Errors
    /// `InvalidParameter` for settings that do not map to usable render
    /// parameters (nothing is stored), or `Playback` when the player rejects
    /// the new buffer (the session ends up paused).
    pub fn update_settings(&mut self, settings: ClickSettings) -> DspResult<()> {
        let params = settings.to_params(self.sample_rate, self.gain)?;
        self.settings = settings;

        let wav = match self.render(&params) {
            Ok(wav) => wav,
            Err(e) if e.is_degenerate() => {
                warn!("keeping previous click: {}", e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        self.current = Some(wav);
        if self.playing {
            self.player.stop();
            self.playing = false;
            self.start()?;
        }
        Ok(())
    }

    fn render(&mut self, params: &ClickParams) -> DspResult<Vec<u8>> {
        let seed = derive_click_seed(self.base_seed, self.renders);
        self.renders += 1;
        debug!("rendering click #{} with seed {}", self.renders, seed);

        let mut rng = create_rng(seed);
        render_click(params, &mut rng)
    }

    fn start(&mut self) -> DspResult<()> {
        let Some(wav) = self.current.as_deref() else {
            return Ok(());
        };
        self.player
            .play_looped(wav)
            .map_err(|message| DspError::Playback { message })?;
        self.playing = true;
        debug!("looping {} byte click", wav.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct RecordingPlayer {
        started: Vec<Vec<u8>>,
        stops: usize,
        looping: bool,
        fail: bool,
    }

    impl ClickPlayer for RecordingPlayer {
        fn play_looped(&mut self, wav: &[u8]) -> Result<(), String> {
            if self.fail {
                return Err("device busy".to_string());
            }
            assert!(!self.looping, "previous loop was not stopped");
            self.started.push(wav.to_vec());
            self.looping = true;
            Ok(())
        }

        fn stop(&mut self) {
            self.stops += 1;
            self.looping = false;
        }
    }

    fn session() -> PlaybackSession<RecordingPlayer> {
        PlaybackSession::with_seed(
            RecordingPlayer::default(),
            ClickSettings::default(),
            48000,
            1000.0,
            42,
        )
    }

    #[test]
    fn test_toggle_starts_and_stops() {
        let mut session = session();
        assert!(!session.is_playing());
        assert!(session.current_buffer().is_none());

        assert!(session.toggle().unwrap());
        assert_eq!(session.player().started.len(), 1);
        assert!(session.current_buffer().is_some());

        assert!(!session.toggle().unwrap());
        assert_eq!(session.player().stops, 1);
        assert!(!session.player().looping);
    }

    #[test]
    fn test_update_while_paused_does_not_play() {
        let mut session = session();
        session
            .update_settings(ClickSettings {
                clicks_per_second: 2.0,
                ..Default::default()
            })
            .unwrap();

        assert!(session.player().started.is_empty());
        assert_eq!(session.current_buffer().map(|b| b.len()), Some(44 + 4 * 24000));
    }

    #[test]
    fn test_update_while_playing_replaces_loop() {
        let mut session = session();
        session.toggle().unwrap();
        session
            .update_settings(ClickSettings {
                frequency_percentile: 80.0,
                ..Default::default()
            })
            .unwrap();

        let player = session.player();
        assert_eq!(player.started.len(), 2);
        assert_eq!(player.stops, 1);
        assert!(player.looping);
        assert_ne!(player.started[0], player.started[1]);
        assert_eq!(session.current_buffer(), Some(player.started[1].as_slice()));
    }

    #[test]
    fn test_invalid_settings_are_not_stored() {
        let mut session = session();
        let err = session
            .update_settings(ClickSettings {
                click_length_ms: 1.0,
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::InvalidParameter);
        assert_eq!(session.settings(), &ClickSettings::default());
    }

    #[test]
    fn test_unusable_params_are_not_stored() {
        // At 100 Hz a 5 ms click has no samples at all.
        let mut session = PlaybackSession::with_seed(
            RecordingPlayer::default(),
            ClickSettings::default(),
            100,
            1000.0,
            7,
        );
        let err = session
            .update_settings(ClickSettings {
                click_length_ms: 5.0,
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::InvalidParameter);
        assert_eq!(session.settings(), &ClickSettings::default());
        assert!(session.current_buffer().is_none());
    }

    #[test]
    fn test_degenerate_update_keeps_previous_loop() {
        // At 250 Hz a 5 ms click is a single sample: only the DC bin is
        // left, so the noise never crosses zero.
        let mut session = PlaybackSession::with_seed(
            RecordingPlayer::default(),
            ClickSettings::default(),
            250,
            1000.0,
            1,
        );
        assert!(session.toggle().unwrap());
        let before = session.current_buffer().map(|b| b.to_vec());
        assert!(before.is_some());

        session
            .update_settings(ClickSettings {
                click_length_ms: 5.0,
                ..Default::default()
            })
            .unwrap();

        assert!(session.is_playing());
        assert_eq!(session.current_buffer().map(|b| b.to_vec()), before);
        let player = session.player();
        assert_eq!(player.started.len(), 1);
        assert_eq!(player.stops, 0);
        assert!(player.looping);
    }

    #[test]
    fn test_player_failure_leaves_session_paused() {
        let mut session = PlaybackSession::with_seed(
            RecordingPlayer {
                fail: true,
                ..Default::default()
            },
            ClickSettings::default(),
            48000,
            1000.0,
            1,
        );

        let err = session.toggle().unwrap_err();
        assert_eq!(err.kind(), FailureKind::Playback);
        assert!(!session.is_playing());
    }

    #[test]
    fn test_unseeded_session_plays() {
        let mut session =
            PlaybackSession::new(RecordingPlayer::default(), ClickSettings::default(), 48000, 1.0);
        assert!(session.toggle().unwrap());
        assert_eq!(session.into_player().started.len(), 1);
    }

    #[test]
    fn test_sessions_with_same_seed_render_same_clicks() {
        let mut a = session();
        let mut b = session();
        a.toggle().unwrap();
        b.toggle().unwrap();
        assert_eq!(a.current_buffer(), b.current_buffer());
    }
}
