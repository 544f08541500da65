#[cfg(feature = "audio")]
pub mod rodio_chime;

use crate::core::traits::{ChimeBackend, SilentChime};
use tracing::warn;

/// Pick the chime backend. Falls back to silence when sound is disabled or
/// no output device can be opened; completion still works visually.
pub fn open_chime(sound: bool) -> Box<dyn ChimeBackend> {
    if !sound {
        return Box::new(SilentChime);
    }

    #[cfg(feature = "audio")]
    {
        match rodio_chime::RodioChime::new() {
            Ok(chime) => Box::new(chime),
            Err(e) => {
                warn!(error = %e, "audio unavailable, completion will be silent");
                Box::new(SilentChime)
            }
        }
    }

    #[cfg(not(feature = "audio"))]
    {
        warn!("built without audio support, completion will be silent");
        Box::new(SilentChime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muted_chime_is_silent() {
        assert!(!open_chime(false).is_audible());
    }
}
