use futures::StreamExt;
use httpmock::prelude::*;
use serde_json::json;

use super::*;

fn settings(base_url: String) -> RuntimeSettings {
    RuntimeSettings {
        api_key: "test-key".to_string(),
        base_url,
        timeout_secs: 5,
        user_agent: "runlens/test".to_string(),
    }
}

#[tokio::test]
async fn chat_completion_parses_response_and_extension_fields() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("Authorization", "Bearer test-key")
                .json_body(json!({
                    "model": "openai/gpt-5-mini",
                    "messages": [
                        {"role": "user", "content": "Hello"}
                    ],
                    "mcp_servers": ["windsor/brave-search-mcp"]
                }));

            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "choices": [
                        {
                            "index": 0,
                            "finish_reason": "stop",
                            "message": {
                                "role": "assistant",
                                "content": "Hi there!",
                                "tool_calls": null
                            }
                        }
                    ],
                    "steps_used": 2,
                    "tools_called": ["brave_search"]
                }));
        })
        .await;

    let client = RuntimeClient::new(&settings(server.base_url())).unwrap();
    let mut request =
        ChatCompletionRequest::new("openai/gpt-5-mini", vec![ChatMessage::user("Hello")]);
    request.mcp_servers = vec!["windsor/brave-search-mcp".to_string()];

    let response = client.chat_completion(request).await.unwrap();

    assert_eq!(response.choices.len(), 1);
    let choice = &response.choices[0];
    assert_eq!(choice.finish_reason.as_deref(), Some("stop"));
    assert_eq!(choice.message.text(), "Hi there!");
    assert!(choice.message.tool_calls.is_empty());
    assert_eq!(response.introspection.steps_used, Some(2));
    assert_eq!(
        response.introspection.tools_called,
        Some(vec!["brave_search".to_string()])
    );
    assert_eq!(response.introspection.intents, None);

    mock.assert_async().await;
}

#[tokio::test]
async fn chat_completion_sends_tools_and_debug_flags() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .json_body_partial(r#"{"debug": true, "verbose": true}"#)
                .body_contains(r#""name":"add""#);
            then.status(200).json_body(json!({
                "choices": [{
                    "finish_reason": "tool_calls",
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": {"name": "add", "arguments": "{\"a\":15,\"b\":27}"}
                        }]
                    }
                }]
            }));
        })
        .await;

    let client = RuntimeClient::new(&settings(server.base_url())).unwrap();
    let mut request = ChatCompletionRequest::new("openai/gpt-5", vec![ChatMessage::user("Add")]);
    request.tools = vec![ToolDefinition {
        kind: "function",
        function: FunctionDefinition {
            name: "add".to_string(),
            description: "Add two numbers.".to_string(),
            parameters: json!({"type": "object"}),
        },
    }];
    request.debug = true;
    request.verbose = true;

    let response = client.chat_completion(request).await.unwrap();
    let message = &response.choices[0].message;
    assert_eq!(message.content, None);
    assert_eq!(message.tool_calls.len(), 1);
    assert_eq!(message.tool_calls[0].function.name, "add");
    assert_eq!(message.tool_calls[0].function.arguments, "{\"a\":15,\"b\":27}");

    mock.assert_async().await;
}

#[tokio::test]
async fn chat_completion_maps_unauthorized_status() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401)
                .header("Content-Type", "application/json")
                .body(r#"{"error":"invalid_api_key"}"#);
        })
        .await;

    let client = RuntimeClient::new(&settings(server.base_url())).unwrap();
    let err = client
        .chat_completion(ChatCompletionRequest::new(
            "openai/gpt-5-mini",
            vec![ChatMessage::user("Hello")],
        ))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Invalid API key"));
    mock.assert_async().await;
}

#[tokio::test]
async fn chat_completion_reports_unexpected_status_with_body() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(404).body("no such route");
        })
        .await;

    let client = RuntimeClient::new(&settings(server.base_url())).unwrap();
    let err = client
        .chat_completion(ChatCompletionRequest::new(
            "openai/gpt-5-mini",
            vec![ChatMessage::user("Hello")],
        ))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Runtime API error (status 404"));
    assert!(message.contains("no such route"));
}

#[tokio::test]
async fn chat_completion_stream_yields_chunks_until_done() {
    let server = MockServer::start_async().await;

    let body = concat!(
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\",\"content\":\"The answer\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\" is 74.\"},\"finish_reason\":\"stop\"}]}\n\n",
        "data: [DONE]\n\n",
    );

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .json_body_partial(r#"{"stream": true}"#);
            then.status(200)
                .header("Content-Type", "text/event-stream")
                .body(body);
        })
        .await;

    let client = RuntimeClient::new(&settings(server.base_url())).unwrap();
    let stream = client
        .chat_completion_stream(ChatCompletionRequest::new(
            "openai/gpt-5",
            vec![ChatMessage::user("Calculate")],
        ))
        .await
        .unwrap();

    let chunks: Vec<ChatCompletionChunk> = stream.map(|chunk| chunk.unwrap()).collect().await;
    assert_eq!(chunks.len(), 2);

    let text: String = chunks
        .iter()
        .filter_map(|chunk| chunk.choices.first())
        .filter_map(|choice| choice.delta.content.clone())
        .collect();
    assert_eq!(text, "The answer is 74.");
    assert_eq!(chunks[1].choices[0].finish_reason.as_deref(), Some("stop"));

    mock.assert_async().await;
}

#[test]
fn new_rejects_empty_base_url() {
    let err = RuntimeClient::new(&settings("/".to_string())).unwrap_err();
    assert!(err.to_string().contains("Base URL cannot be empty"));
}
