//! Pipeline orchestrator for ytquiz.
//!
//! Coordinates transcript fetching, quiz generation, chapter resolution and
//! the on-disk cache. Every step is awaited before the next one starts.

use crate::cache::AnalysisCache;
use crate::chapters::{self, ChapterEntry};
use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::generator::{OpenAIGenerator, QuizGenerator};
use crate::quiz::AnalysisResult;
use crate::video::{SearchResult, VideoId, VideoSource, YoutubeSource};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

/// The main orchestrator for the ytquiz pipeline.
pub struct Orchestrator {
    source: Arc<dyn VideoSource>,
    generator: Arc<dyn QuizGenerator>,
    cache: AnalysisCache,
}

/// Outcome of analyzing a video.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub video_id: VideoId,
    pub result: AnalysisResult,
    /// True when the result was loaded from the cache.
    pub from_cache: bool,
    pub cache_path: PathBuf,
}

impl Orchestrator {
    /// Create an orchestrator backed by yt-dlp and OpenAI.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let source = Arc::new(YoutubeSource::new(&settings.youtube));
        let generator = Arc::new(OpenAIGenerator::new(&settings.generator, prompts)?);
        let cache = AnalysisCache::new(settings.cache_dir());

        Ok(Self::with_components(source, generator, cache))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        source: Arc<dyn VideoSource>,
        generator: Arc<dyn QuizGenerator>,
        cache: AnalysisCache,
    ) -> Self {
        Self {
            source,
            generator,
            cache,
        }
    }

    /// Get a reference to the video source.
    pub fn source(&self) -> Arc<dyn VideoSource> {
        self.source.clone()
    }

    /// Get a reference to the cache.
    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    /// Search for videos.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        self.source.search(query, limit).await
    }

    /// Produce the summary, quiz and chapters for a video.
    ///
    /// A cached result is returned as-is unless `force` is set. Otherwise the
    /// transcript is fetched, the quiz generated, chapters resolved and the
    /// result written to the cache.
    #[instrument(skip(self), fields(input = %input))]
    pub async fn analyze(&self, input: &str, force: bool) -> Result<Analysis> {
        let video_id = VideoId::parse(input)?;
        let cache_path = self.cache.path_for(&video_id);

        if !force {
            if let Some(result) = self.cache.load(&video_id)? {
                info!("Using cached analysis for {}", video_id);
                return Ok(Analysis {
                    video_id,
                    result,
                    from_cache: true,
                    cache_path,
                });
            }
        }

        info!("Fetching transcript");
        let transcript = self.source.fetch_transcript(&video_id).await?;

        info!("Generating summary and quiz");
        let output = self.generator.generate(&transcript).await?;
        info!("Generator output was {}", output.kind());

        let chapters = self.resolve(&video_id).await?;

        let result = output.into_analysis(chapters);
        let cache_path = self.cache.store(&video_id, &result)?;

        Ok(Analysis {
            video_id,
            result,
            from_cache: false,
            cache_path,
        })
    }

    /// Resolve the chapter list of a video without generating anything.
    ///
    /// Invalid identifiers are rejected before any network access.
    #[instrument(skip(self), fields(input = %input))]
    pub async fn chapters(&self, input: &str) -> Result<Vec<ChapterEntry>> {
        let video_id = VideoId::parse(input)?;
        self.resolve(&video_id).await
    }

    /// Fetch the transcript of a video.
    pub async fn transcript(&self, input: &str) -> Result<String> {
        let video_id = VideoId::parse(input)?;
        self.source.fetch_transcript(&video_id).await
    }

    async fn resolve(&self, video_id: &VideoId) -> Result<Vec<ChapterEntry>> {
        info!("Fetching metadata");
        let metadata = self.source.fetch_metadata(video_id).await?;

        let chapters = chapters::for_metadata(&metadata);
        info!(
            "Resolved {} chapters ({})",
            chapters.len(),
            if metadata.chapters.is_empty() { "description" } else { "metadata" }
        );
        Ok(chapters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapters::AuthoritativeChapter;
    use crate::error::YtquizError;
    use crate::quiz::GeneratorOutput;
    use crate::video::VideoMetadata;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeSource {
        calls: Mutex<Vec<&'static str>>,
        chapters: Vec<AuthoritativeChapter>,
        fail_transcript: bool,
    }

    impl FakeSource {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VideoSource for FakeSource {
        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchResult>> {
            self.calls.lock().unwrap().push("search");
            Ok(Vec::new())
        }

        async fn fetch_metadata(&self, id: &VideoId) -> Result<VideoMetadata> {
            self.calls.lock().unwrap().push("metadata");
            Ok(VideoMetadata {
                id: id.clone(),
                title: "Test video".to_string(),
                channel: None,
                duration_seconds: Some(660),
                description: "0:00 Intro\n1:30 Setup\n10:00 Conclusion".to_string(),
                chapters: self.chapters.clone(),
            })
        }

        async fn fetch_transcript(&self, id: &VideoId) -> Result<String> {
            self.calls.lock().unwrap().push("transcript");
            if self.fail_transcript {
                return Err(YtquizError::TranscriptUnavailable(id.to_string()));
            }
            Ok("hello world".to_string())
        }
    }

    struct FakeGenerator {
        reply: &'static str,
        calls: AtomicUsize,
    }

    impl FakeGenerator {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl QuizGenerator for FakeGenerator {
        async fn generate(&self, transcript: &str) -> Result<GeneratorOutput> {
            assert_eq!(transcript, "hello world");
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GeneratorOutput::parse(self.reply))
        }
    }

    const REPLY: &str = r#"```json
{"summary": "About greetings", "quiz": [{"question": "Q?", "options": {"A": "a", "B": "b", "C": "c", "D": "d"}, "answer": "B"}]}
```"#;

    fn setup(
        source: FakeSource,
        reply: &'static str,
    ) -> (Orchestrator, Arc<FakeSource>, Arc<FakeGenerator>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(source);
        let generator = Arc::new(FakeGenerator::new(reply));
        let orchestrator = Orchestrator::with_components(
            source.clone(),
            generator.clone(),
            AnalysisCache::new(dir.path()),
        );
        (orchestrator, source, generator, dir)
    }

    #[tokio::test]
    async fn test_analyze_runs_pipeline_and_caches() {
        let (orchestrator, source, generator, _dir) = setup(FakeSource::default(), REPLY);

        let analysis = orchestrator.analyze("https://youtu.be/aircAruvnKk", false).await.unwrap();

        assert!(!analysis.from_cache);
        assert_eq!(analysis.video_id.as_str(), "aircAruvnKk");
        assert_eq!(analysis.result.summary_text(), Some("About greetings"));
        assert_eq!(analysis.result.quiz[0].answer, "B");
        assert_eq!(analysis.result.chapters.len(), 3);
        assert_eq!(analysis.result.chapters[2].end_time.as_deref(), Some("11:00"));
        assert!(analysis.cache_path.exists());
        assert_eq!(source.calls(), vec!["transcript", "metadata"]);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_external_calls() {
        let (orchestrator, source, generator, _dir) = setup(FakeSource::default(), REPLY);

        let first = orchestrator.analyze("aircAruvnKk", false).await.unwrap();
        let second = orchestrator.analyze("aircAruvnKk", false).await.unwrap();

        assert!(second.from_cache);
        assert_eq!(second.result, first.result);
        assert_eq!(source.calls().len(), 2);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_force_regenerates() {
        let (orchestrator, source, generator, _dir) = setup(FakeSource::default(), REPLY);

        orchestrator.analyze("aircAruvnKk", false).await.unwrap();
        let again = orchestrator.analyze("aircAruvnKk", true).await.unwrap();

        assert!(!again.from_cache);
        assert_eq!(source.calls().len(), 4);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_id_rejected_before_any_call() {
        let (orchestrator, source, generator, dir) = setup(FakeSource::default(), REPLY);

        let err = orchestrator.analyze("abc", false).await.unwrap_err();
        assert!(matches!(err, YtquizError::InvalidVideoId(_)));

        let err = orchestrator.chapters("abc").await.unwrap_err();
        assert!(matches!(err, YtquizError::InvalidVideoId(_)));

        assert!(source.calls().is_empty());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_raw_reply_is_cached_as_raw_response() {
        let (orchestrator, _source, _generator, _dir) =
            setup(FakeSource::default(), "I cannot do that.");

        let analysis = orchestrator.analyze("aircAruvnKk", false).await.unwrap();

        assert_eq!(analysis.result.raw_response.as_deref(), Some("I cannot do that."));
        assert!(!analysis.result.has_quiz());
        assert_eq!(analysis.result.chapters.len(), 3);
    }

    #[tokio::test]
    async fn test_transcript_failure_propagates_without_caching() {
        let source = FakeSource {
            fail_transcript: true,
            ..Default::default()
        };
        let (orchestrator, _source, generator, _dir) = setup(source, REPLY);

        let err = orchestrator.analyze("aircAruvnKk", false).await.unwrap_err();

        assert!(matches!(err, YtquizError::TranscriptUnavailable(_)));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        let id = VideoId::parse("aircAruvnKk").unwrap();
        assert!(!orchestrator.cache().contains(&id));
    }

    #[tokio::test]
    async fn test_chapters_prefer_metadata() {
        let source = FakeSource {
            chapters: vec![AuthoritativeChapter {
                start_time: Some(0.0),
                end_time: Some(120.0),
                title: Some("A".to_string()),
            }],
            ..Default::default()
        };
        let (orchestrator, source, _generator, _dir) = setup(source, REPLY);

        let chapters = orchestrator.chapters("aircAruvnKk").await.unwrap();

        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "A");
        assert_eq!(chapters[0].end_time.as_deref(), Some("2:00"));
        assert_eq!(source.calls(), vec!["metadata"]);
    }
}
