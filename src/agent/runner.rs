//! Agent runner with tool calling loop.

use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use crate::config::{AgentSettings, Prompts};
use crate::error::{Result, YtquizError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use tracing::{debug, info};

/// Agent that can use tools to work with YouTube videos.
pub struct Agent {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    tools: ToolContext,
    max_iterations: usize,
    system_prompt: String,
}

impl Agent {
    /// Create a new agent from settings and prompts.
    pub fn new(tools: ToolContext, settings: &AgentSettings, prompts: &Prompts) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            model: settings.model.clone(),
            tools,
            max_iterations: settings.max_iterations,
            system_prompt: prompts.agent.system.clone(),
        })
    }

    /// Use a different model than the configured one.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Run the agent with a user task.
    pub async fn run(&self, task: &str, context: Option<&str>) -> Result<AgentResponse> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| YtquizError::Agent(e.to_string()))?
                .into(),
        ];

        let user_message = match context {
            Some(ctx) => format!("Context: {}\n\nTask: {}", ctx, task),
            None => task.to_string(),
        };

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()
                .map_err(|e| YtquizError::Agent(e.to_string()))?
                .into(),
        );

        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(YtquizError::Agent(format!(
                    "Agent exceeded maximum iterations ({})",
                    self.max_iterations
                )));
            }

            debug!("Agent iteration {}", iterations);

            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.model)
                .messages(messages.clone())
                .tools(tool_definitions())
                .build()
                .map_err(|e| YtquizError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| YtquizError::OpenAI(format!("Agent API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| YtquizError::Agent("No response from model".to_string()))?;

            let tool_calls = match &choice.message.tool_calls {
                Some(calls) if !calls.is_empty() => calls,
                _ => {
                    return Ok(AgentResponse {
                        content: choice.message.content.clone().unwrap_or_default(),
                        tool_calls: tool_calls_made,
                        iterations,
                    });
                }
            };

            let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                .tool_calls(tool_calls.clone())
                .build()
                .map_err(|e| YtquizError::Agent(e.to_string()))?;
            messages.push(assistant_msg.into());

            // Tools run one after another, in the order the model asked for them
            for tool_call in tool_calls {
                let record = self.execute_tool_call(tool_call).await;

                let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                    .tool_call_id(&tool_call.id)
                    .content(record.result.clone())
                    .build()
                    .map_err(|e| YtquizError::Agent(e.to_string()))?;
                messages.push(tool_msg.into());

                tool_calls_made.push(record);
            }
        }
    }

    /// Execute a single tool call and return a record of it.
    ///
    /// Tool failures are reported back to the model as text.
    async fn execute_tool_call(&self, tool_call: &ChatCompletionMessageToolCall) -> ToolCallRecord {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("Agent calling tool: {} with args: {}", name, arguments);

        let result = match parse_tool_call(name, arguments) {
            Ok(tool) => match self.tools.execute(&tool).await {
                Ok(output) => output,
                Err(e) => format!("Tool error: {}", e),
            },
            Err(e) => format!("Failed to parse tool call: {}", e),
        };

        ToolCallRecord {
            name: name.clone(),
            arguments: arguments.clone(),
            result,
        }
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}
