use std::fs::File;
use std::io;
use std::path::Path;

use log::{debug, trace};
use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;

use crate::error::LengthError;

/// What the decoder made of a single file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Length {
    /// Whole seconds, truncated.
    Seconds(u64),
    /// The file exists but is not an audio container we can read.
    NotAudio,
}

/// Source of per-file durations.
pub trait DurationProbe {
    fn length(&self, path: &Path) -> Result<Length, LengthError>;
}

/// Reads durations from container headers with symphonia.
#[derive(Clone, Copy, Debug, Default)]
pub struct SymphoniaProbe;

impl DurationProbe for SymphoniaProbe {
    fn length(&self, path: &Path) -> Result<Length, LengthError> {
        let file = File::open(path).map_err(|e| LengthError::io(path, e))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = match symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        ) {
            Ok(probed) => probed,
            Err(e) => return classify(path, e),
        };

        let length = match read_length(probed.format) {
            Ok(length) => length,
            Err(e) => return classify(path, e),
        };
        debug!("{}: {:?}", path.display(), length);
        Ok(length)
    }
}

// The audio track currently being demuxed and the frames seen on it so far.
#[derive(Clone, Copy, Debug)]
struct Segment {
    track_id: u32,
    time_base: Option<TimeBase>,
    sample_rate: Option<u32>,
    frames: u64,
}

impl Segment {
    fn first_audio(format: &dyn FormatReader) -> Option<Self> {
        format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .map(|t| Segment {
                track_id: t.id,
                time_base: t.codec_params.time_base,
                sample_rate: t.codec_params.sample_rate,
                frames: 0,
            })
    }

    fn seconds(&self) -> Option<f64> {
        match (self.time_base, self.sample_rate) {
            (Some(tb), _) => {
                let time = tb.calc_time(self.frames);
                Some(time.seconds as f64 + time.frac)
            }
            (None, Some(rate)) if rate > 0 => Some(self.frames as f64 / f64::from(rate)),
            _ => None,
        }
    }
}

fn read_length(mut format: Box<dyn FormatReader>) -> Result<Length, SymphoniaError> {
    let segment = match Segment::first_audio(&*format) {
        Some(segment) => segment,
        None => return Ok(Length::NotAudio),
    };

    let n_frames = format
        .tracks()
        .iter()
        .find(|t| t.id == segment.track_id)
        .and_then(|t| t.codec_params.n_frames);

    match (n_frames, segment.time_base) {
        (Some(frames), Some(tb)) => Ok(Length::Seconds(whole_seconds(tb, frames))),
        (Some(frames), None) => Ok(seconds_or_not_audio(Segment { frames, ..segment }.seconds())),
        (None, _) => demux_length(format.as_mut(), segment),
    }
}

fn seconds_or_not_audio(seconds: Option<f64>) -> Length {
    match seconds {
        Some(s) => Length::Seconds(s as u64),
        None => Length::NotAudio,
    }
}

// Containers without a frame count in their headers have to be demuxed to the end.
// Chained streams (e.g. Ogg) signal a reset between links; each link is timed
// with its own time base and the links are summed.
fn demux_length(
    format: &mut dyn FormatReader,
    mut segment: Segment,
) -> Result<Length, SymphoniaError> {
    let mut total = 0f64;
    loop {
        match format.next_packet() {
            Ok(packet) if packet.track_id() == segment.track_id => segment.frames += packet.dur(),
            Ok(_) => {}
            Err(SymphoniaError::IoError(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => {
                trace!("counted {} frames on track {}", segment.frames, segment.track_id);
                match segment.seconds() {
                    Some(s) => total += s,
                    None => return Ok(Length::NotAudio),
                }
                segment = match Segment::first_audio(&*format) {
                    Some(next) => next,
                    None => return Ok(Length::Seconds(total as u64)),
                };
                debug!("stream reset, continuing on track {}", segment.track_id);
            }
            Err(e) => return Err(e),
        }
    }
    trace!("counted {} frames on track {}", segment.frames, segment.track_id);

    Ok(seconds_or_not_audio(segment.seconds().map(|s| total + s)))
}

fn whole_seconds(time_base: TimeBase, frames: u64) -> u64 {
    time_base.calc_time(frames).seconds
}

fn classify(path: &Path, err: SymphoniaError) -> Result<Length, LengthError> {
    match err {
        SymphoniaError::Unsupported(_) | SymphoniaError::DecodeError(_) => {
            debug!("{}: not audio ({})", path.display(), err);
            Ok(Length::NotAudio)
        }
        // The probe runs off the end of short files that carry no known marker.
        SymphoniaError::IoError(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            debug!("{}: not audio (end of stream)", path.display());
            Ok(Length::NotAudio)
        }
        SymphoniaError::IoError(e) => Err(LengthError::io(path, e)),
        other => Err(LengthError::Decode {
            path: path.to_path_buf(),
            source: other,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_wav(path: &Path, sample_rate: u32, frames: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..frames {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn reads_whole_seconds_from_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("two.wav");
        write_wav(&path, 8000, 16000);

        assert_eq!(SymphoniaProbe.length(&path).unwrap(), Length::Seconds(2));
    }

    #[test]
    fn truncates_partial_seconds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("almost_three.wav");
        write_wav(&path, 8000, 23999);

        assert_eq!(SymphoniaProbe.length(&path).unwrap(), Length::Seconds(2));
    }

    #[test]
    fn text_file_is_not_audio() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.mp3");
        fs::write(&path, b"not a real mp3").unwrap();

        assert_eq!(SymphoniaProbe.length(&path).unwrap(), Length::NotAudio);
    }

    #[test]
    fn empty_file_is_not_audio() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.mp3");
        fs::write(&path, b"").unwrap();

        assert_eq!(SymphoniaProbe.length(&path).unwrap(), Length::NotAudio);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = PathBuf::from("/definitely/not/here.mp3");
        match SymphoniaProbe.length(&path) {
            Err(LengthError::Io { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected io error, got {:?}", other),
        }
    }

    fn segment(time_base: Option<TimeBase>, sample_rate: Option<u32>, frames: u64) -> Segment {
        Segment {
            track_id: 0,
            time_base,
            sample_rate,
            frames,
        }
    }

    #[test]
    fn segment_seconds_prefers_time_base() {
        let s = segment(Some(TimeBase::new(1, 48000)), Some(44100), 96000);
        assert_eq!(s.seconds(), Some(2.0));
    }

    #[test]
    fn segment_seconds_falls_back_to_sample_rate() {
        let s = segment(None, Some(8000), 20000);
        assert_eq!(s.seconds(), Some(2.5));
        assert_eq!(seconds_or_not_audio(s.seconds()), Length::Seconds(2));
    }

    #[test]
    fn segment_without_timing_is_not_audio() {
        assert_eq!(segment(None, None, 1000).seconds(), None);
        assert_eq!(segment(None, Some(0), 1000).seconds(), None);
        assert_eq!(seconds_or_not_audio(None), Length::NotAudio);
    }

    #[test]
    fn whole_seconds_truncates() {
        let tb = TimeBase::new(1, 44100);
        assert_eq!(whole_seconds(tb, 0), 0);
        assert_eq!(whole_seconds(tb, 44099), 0);
        assert_eq!(whole_seconds(tb, 44100), 1);
        assert_eq!(whole_seconds(tb, 44100 * 65 + 100), 65);
    }
}
