//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged by `type`:
//!
//! | Direction | `type` | Fields |
//! |---|---|---|
//! | server→client | `config` | `volumeStep`, `skipSeconds` |
//! | server→client | `sync` | `isPlaying`, `currentTime`, `lastUpdate` |
//! | server→client | `error` | `message` |
//! | client→server | `control` | `isPlaying`, `currentTime` |

use serde::{Deserialize, Serialize};

/// Playback state as sent to viewers (`lastUpdate` is Unix milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    pub is_playing: bool,
    pub current_time: f64,
    pub last_update: i64,
}

/// Server-to-client messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Config { volume_step: u32, skip_seconds: u32 },
    Sync(SyncPayload),
    Error { message: String },
}

/// Client-to-server messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    Control { is_playing: bool, current_time: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_message_format() {
        // テスト項目: config メッセージが camelCase のフィールドで出力される
        // given (前提条件):
        let msg = ServerMessage::Config {
            volume_step: 5,
            skip_seconds: 10,
        };

        // when (操作):
        let value = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"type": "config", "volumeStep": 5, "skipSeconds": 10})
        );
    }

    #[test]
    fn test_sync_message_format() {
        // テスト項目: sync メッセージの type と状態フィールドが同じ階層に並ぶ
        // given (前提条件):
        let msg = ServerMessage::Sync(SyncPayload {
            is_playing: true,
            current_time: 12.5,
            last_update: 1_700_000_000_000,
        });

        // when (操作):
        let value = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "sync",
                "isPlaying": true,
                "currentTime": 12.5,
                "lastUpdate": 1_700_000_000_000i64
            })
        );
    }

    #[test]
    fn test_error_message_format() {
        // テスト項目: error メッセージに message が含まれる
        // given (前提条件):
        let msg = ServerMessage::Error {
            message: "Server full".to_string(),
        };

        // when (操作):
        let value = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(value, json!({"type": "error", "message": "Server full"}));
    }

    #[test]
    fn test_parse_control_message() {
        // テスト項目: クライアントからの control メッセージを解釈できる
        // given (前提条件):
        let text = r#"{"type":"control","isPlaying":false,"currentTime":42.25}"#;

        // when (操作):
        let msg: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            msg,
            ClientMessage::Control {
                is_playing: false,
                current_time: 42.25,
            }
        );
    }

    #[test]
    fn test_parse_control_message_missing_field() {
        // テスト項目: フィールドが欠けた control メッセージはエラーになる
        // given (前提条件):
        let text = r#"{"type":"control","isPlaying":true}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientMessage>(text);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
