//! Tool definitions and implementations for the agent system.

use crate::chapters;
use crate::error::{Result, YtquizError};
use crate::video::{VideoId, VideoSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Available tools for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Fetch the full transcript of a video.
    GetTranscript { video_id: String },

    /// Get the chapters of a video.
    GetChapters { video_id: String },

    /// Search for videos.
    SearchVideos {
        query: String,
        #[serde(default = "default_limit")]
        limit: u32,
    },
}

fn default_limit() -> u32 {
    5
}

/// Tool execution context with access to the video source.
pub struct ToolContext {
    pub source: Arc<dyn VideoSource>,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(source: Arc<dyn VideoSource>) -> Self {
        Self { source }
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::GetTranscript { video_id } => self.execute_get_transcript(video_id).await,
            ToolCall::GetChapters { video_id } => self.execute_get_chapters(video_id).await,
            ToolCall::SearchVideos { query, limit } => {
                self.execute_search_videos(query, *limit).await
            }
        }
    }

    async fn execute_get_transcript(&self, video_id: &str) -> Result<String> {
        let id = VideoId::parse(video_id)?;
        self.source.fetch_transcript(&id).await
    }

    async fn execute_get_chapters(&self, video_id: &str) -> Result<String> {
        let id = VideoId::parse(video_id)?;
        let metadata = self.source.fetch_metadata(&id).await?;
        let chapters = chapters::for_metadata(&metadata);

        if chapters.is_empty() {
            return Ok("No chapters available for this video.".to_string());
        }

        Ok(serde_json::to_string_pretty(&chapters)?)
    }

    async fn execute_search_videos(&self, query: &str, limit: u32) -> Result<String> {
        let results = self.source.search(query, limit as usize).await?;

        if results.is_empty() {
            return Ok("No videos found.".to_string());
        }

        let formatted = results
            .iter()
            .enumerate()
            .map(|(i, r)| {
                format!(
                    "{}. {} (ID: {}, channel: {}, duration: {})",
                    i + 1,
                    r.title,
                    r.video_id,
                    r.channel,
                    r.duration_display
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(format!("Found {} videos:\n\n{}", results.len(), formatted))
    }
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    let video_id_parameters = serde_json::json!({
        "type": "object",
        "properties": {
            "video_id": {
                "type": "string",
                "description": "The 11-character YouTube video ID, e.g. 'b1Fo_M_tj6w'"
            }
        },
        "required": ["video_id"]
    });

    vec![
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "get_transcript".to_string(),
                description: Some(
                    "Fetch the full transcript of a YouTube video. Use this for summaries, \
                    quizzes, or any question about what is said in the video."
                        .to_string(),
                ),
                parameters: Some(video_id_parameters.clone()),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "get_chapters".to_string(),
                description: Some(
                    "Get the chapters of a YouTube video as a list of {title, start_time, end_time}. \
                    Uses the uploader's chapters, or timestamps from the description."
                        .to_string(),
                ),
                parameters: Some(video_id_parameters),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "search_videos".to_string(),
                description: Some(
                    "Search YouTube for videos matching a query. Returns titles and video IDs."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The search query"
                        },
                        "limit": {
                            "type": "integer",
                            "description": "Maximum number of results (default: 5)",
                            "default": 5
                        }
                    },
                    "required": ["query"]
                })),
                strict: None,
            },
        },
    ]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| YtquizError::Agent(format!("Invalid tool arguments: {}", e)))?;

    let video_id = || -> Result<String> {
        args["video_id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| YtquizError::Agent("Missing 'video_id' argument".to_string()))
    };

    match name {
        "get_transcript" => Ok(ToolCall::GetTranscript { video_id: video_id()? }),
        "get_chapters" => Ok(ToolCall::GetChapters { video_id: video_id()? }),
        "search_videos" => {
            let query = args["query"]
                .as_str()
                .ok_or_else(|| YtquizError::Agent("Missing 'query' argument".to_string()))?
                .to_string();
            let limit = args["limit"].as_u64().unwrap_or(5) as u32;
            Ok(ToolCall::SearchVideos { query, limit })
        }
        _ => Err(YtquizError::Agent(format!("Unknown tool: {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::{SearchResult, VideoMetadata};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSource {
        description: &'static str,
        results: Vec<SearchResult>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn new(description: &'static str) -> Self {
            Self {
                description,
                results: Vec::new(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl VideoSource for FakeSource {
        async fn search(&self, _query: &str, limit: usize) -> Result<Vec<SearchResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.results.iter().take(limit).cloned().collect())
        }

        async fn fetch_metadata(&self, id: &VideoId) -> Result<VideoMetadata> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(VideoMetadata {
                id: id.clone(),
                title: "Test video".to_string(),
                channel: None,
                duration_seconds: Some(660),
                description: self.description.to_string(),
                chapters: Vec::new(),
            })
        }

        async fn fetch_transcript(&self, _id: &VideoId) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("hello world".to_string())
        }
    }

    fn context(source: FakeSource) -> (ToolContext, Arc<FakeSource>) {
        let source = Arc::new(source);
        (ToolContext::new(source.clone()), source)
    }

    #[tokio::test]
    async fn test_get_chapters_from_description() {
        let (tools, _source) = context(FakeSource::new("0:00 Intro\n1:30 Setup\n10:00 Conclusion"));

        let out = tools
            .execute(&ToolCall::GetChapters { video_id: "aircAruvnKk".to_string() })
            .await
            .unwrap();

        let chapters: Vec<crate::chapters::ChapterEntry> = serde_json::from_str(&out).unwrap();
        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[1].title, "Setup");
        assert_eq!(chapters[2].end_time.as_deref(), Some("11:00"));
    }

    #[tokio::test]
    async fn test_get_chapters_when_none() {
        let (tools, _source) = context(FakeSource::new("No timestamps here."));

        let out = tools
            .execute(&ToolCall::GetChapters { video_id: "aircAruvnKk".to_string() })
            .await
            .unwrap();
        assert_eq!(out, "No chapters available for this video.");
    }

    #[tokio::test]
    async fn test_get_transcript() {
        let (tools, _source) = context(FakeSource::new(""));

        let out = tools
            .execute(&ToolCall::GetTranscript {
                video_id: "https://youtu.be/aircAruvnKk".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(out, "hello world");
    }

    #[tokio::test]
    async fn test_search_videos_formatting() {
        let mut source = FakeSource::new("");
        source.results = vec![
            SearchResult {
                video_id: "aircAruvnKk".to_string(),
                title: "But what is a neural network?".to_string(),
                channel: "3Blue1Brown".to_string(),
                duration_display: "18:40".to_string(),
            },
            SearchResult {
                video_id: "IHZwWFHWa-w".to_string(),
                title: "Gradient descent".to_string(),
                channel: "3Blue1Brown".to_string(),
                duration_display: "21:01".to_string(),
            },
        ];
        let (tools, _source) = context(source);

        let out = tools
            .execute(&ToolCall::SearchVideos { query: "neural".to_string(), limit: 5 })
            .await
            .unwrap();
        assert!(out.starts_with("Found 2 videos:"));
        assert!(out.contains(
            "1. But what is a neural network? (ID: aircAruvnKk, channel: 3Blue1Brown, duration: 18:40)"
        ));
        assert!(out.contains("2. Gradient descent"));

        let none = tools
            .execute(&ToolCall::SearchVideos { query: "neural".to_string(), limit: 0 })
            .await
            .unwrap();
        assert_eq!(none, "No videos found.");
    }

    #[tokio::test]
    async fn test_invalid_video_id_rejected_before_fetch() {
        let (tools, source) = context(FakeSource::new("0:00 Intro"));

        for tool in [
            ToolCall::GetChapters { video_id: "abc".to_string() },
            ToolCall::GetTranscript { video_id: "abc".to_string() },
        ] {
            let err = tools.execute(&tool).await.unwrap_err();
            assert!(matches!(err, YtquizError::InvalidVideoId(_)));
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_parse_search_tool() {
        let tool = parse_tool_call("search_videos", r#"{"query": "neural networks", "limit": 3}"#)
            .unwrap();
        match tool {
            ToolCall::SearchVideos { query, limit } => {
                assert_eq!(query, "neural networks");
                assert_eq!(limit, 3);
            }
            _ => panic!("Expected SearchVideos tool"),
        }
    }

    #[test]
    fn test_parse_video_tools() {
        match parse_tool_call("get_chapters", r#"{"video_id": "b1Fo_M_tj6w"}"#).unwrap() {
            ToolCall::GetChapters { video_id } => assert_eq!(video_id, "b1Fo_M_tj6w"),
            _ => panic!("Expected GetChapters tool"),
        }
        assert!(matches!(
            parse_tool_call("get_transcript", r#"{"video_id": "dQw4w9WgXcQ"}"#).unwrap(),
            ToolCall::GetTranscript { .. }
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_tool_call("get_transcript", "{}").is_err());
        assert!(parse_tool_call("get_transcript", "not json").is_err());
        assert!(parse_tool_call("delete_video", "{}").is_err());
    }

    #[test]
    fn test_tool_definitions_match_parser() {
        for tool in tool_definitions() {
            let name = tool.function.name;
            let args = if name == "search_videos" {
                r#"{"query": "x"}"#
            } else {
                r#"{"video_id": "dQw4w9WgXcQ"}"#
            };
            assert!(parse_tool_call(&name, args).is_ok(), "{}", name);
        }
    }
}
