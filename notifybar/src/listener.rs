//! Ingestion loop fed by a bus bridge with one JSON `Notify` request per line.

use chrono::NaiveDateTime;
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use notify_store::QueueStore;

use crate::ingest::{NotificationService, NotifyRequest};

/// Read requests until EOF, queueing each one and answering `{"id":0}`.
///
/// Lines that do not decode are logged and skipped; a storage failure
/// stops the loop. Returns the number of notifications queued.
pub async fn run<S, R, W, C>(
    service: &NotificationService<'_, S>,
    reader: R,
    mut writer: W,
    clock: C,
) -> Result<usize, anyhow::Error>
where
    S: QueueStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    C: Fn() -> NaiveDateTime,
{
    let mut lines = reader.lines();
    let mut accepted = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let request: NotifyRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!("Skipping undecodable request: {e}");
                continue;
            }
        };

        let id = service.notify(request, clock())?;
        accepted += 1;

        let mut reply = json!({ "id": id }).to_string();
        reply.push('\n');
        writer.write_all(reply.as_bytes()).await?;
        writer.flush().await?;
    }

    tracing::info!(accepted, "Listener input closed");
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use chrono::NaiveDate;
    use notify_store::MemoryStore;
    use tokio::io::BufReader;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 8, 9)
            .unwrap()
            .and_hms_opt(7, 45, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn queues_each_request_and_replies() {
        let input = concat!(
            r#"{"app_name":"a","summary":"one","body":"x","expire_timeout":-1,"hints":{"urgency":2}}"#,
            "\n",
            "\n",
            r#"{"app_name":"b","summary":"two","body":"y","expire_timeout":1500}"#,
            "\n",
        );
        let store = MemoryStore::new();
        let config = AppConfig::default();
        let service = NotificationService::new(&store, &config);
        let mut out = Vec::new();

        let n = run(&service, BufReader::new(input.as_bytes()), &mut out, now)
            .await
            .unwrap();

        assert_eq!(n, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "{\"id\":0}\n{\"id\":0}\n");
        let queued = store.read_all().unwrap();
        assert_eq!(queued.len(), 2);
        assert_eq!(queued[0].summary, "one");
        assert_eq!(queued[0].expire_timeout, 4000);
        assert_eq!(queued[0].urgency, 2);
        assert_eq!(queued[1].summary, "two");
        assert_eq!(queued[1].expire_timeout, 1500);
        assert!(queued.iter().all(|r| r.timetag == now()));
    }

    #[tokio::test]
    async fn skips_undecodable_lines() {
        let input = "not json\n{\"summary\":\"ok\"}\n[1,2]\n";
        let store = MemoryStore::new();
        let config = AppConfig::default();
        let service = NotificationService::new(&store, &config);
        let mut out = Vec::new();

        let n = run(&service, BufReader::new(input.as_bytes()), &mut out, now)
            .await
            .unwrap();

        assert_eq!(n, 1);
        let queued = store.read_all().unwrap();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].summary, "ok");
        assert_eq!(queued[0].expire_timeout, 4000);
    }
}
