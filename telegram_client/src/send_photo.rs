use reqwest::multipart::{Form, Part};

use super::TelegramClient;
use crate::types::{ApiResponse, Message, TelegramError};

/// Best effort content type for the uploaded photo, keyed on the file extension
pub fn photo_mime(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

impl TelegramClient {
    #[tracing::instrument(skip(self, photo), fields(photo_len = photo.len()), err)]
    /// Upload `photo` to `chat_id` with a caption via the sendPhoto method
    pub async fn send_photo(
        &self,
        chat_id: &str,
        photo: Vec<u8>,
        file_name: &str,
        caption: &str,
    ) -> Result<Message, TelegramError> {
        let part = Part::bytes(photo)
            .file_name(file_name.to_string())
            .mime_str(photo_mime(file_name))?;

        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part("photo", part);

        let response = self
            .client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await?;

        let status_code = response.status();
        let body = response.bytes().await?;

        let envelope: ApiResponse<Message> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(
                    error=?e,
                    status=%status_code,
                    body=%String::from_utf8_lossy(&body),
                    "unexpected response from bot api"
                );
                return Err(TelegramError::UnexpectedResponse {
                    status: status_code.as_u16(),
                });
            }
        };

        envelope.into_result(status_code.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    const TOKEN: &str = "123456:secret-token";

    /// client for `url` that ignores any proxy configured on the host
    fn client(url: &str) -> TelegramClient {
        let mut client = TelegramClient::new(TOKEN, url).unwrap();
        client.client = reqwest::Client::builder().no_proxy().build().unwrap();
        client
    }

    /// Accepts one connection, answers with `status` and `body`, returns the raw request
    async fn serve_once(listener: TcpListener, status: &'static str, body: &'static str) -> String {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);

            if let Some(header_end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&request[..header_end]).to_ascii_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .map(|len| len.trim().parse::<usize>().unwrap())
                    .unwrap_or(0);
                if request.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();

        String::from_utf8_lossy(&request).into_owned()
    }

    async fn listen() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        (listener, url)
    }

    #[tokio::test]
    async fn posts_multipart_photo_to_method_url() {
        let (listener, url) = listen().await;
        let server = tokio::spawn(serve_once(
            listener,
            "200 OK",
            r#"{"ok":true,"result":{"message_id":42,"chat":{"id":-500200}}}"#,
        ));

        let message = client(&url)
            .send_photo(
                "-500200",
                b"jpeg-bytes".to_vec(),
                "2024-500200-Jane-Doe.jpg",
                "Message from Jane Doe",
            )
            .await
            .unwrap();

        assert_eq!(message.message_id, 42);
        assert_eq!(message.chat.id, -500200);

        let request = server.await.unwrap();
        assert!(request.starts_with(&format!("POST /bot{TOKEN}/sendPhoto HTTP/1.1\r\n")));

        let lowered = request.to_ascii_lowercase();
        assert!(lowered.contains("content-type: multipart/form-data; boundary="));
        assert!(request.contains("name=\"chat_id\"\r\n\r\n-500200\r\n"));
        assert!(request.contains("name=\"caption\"\r\n\r\nMessage from Jane Doe\r\n"));
        assert!(request.contains("name=\"photo\"; filename=\"2024-500200-Jane-Doe.jpg\""));
        assert!(lowered.contains("content-type: image/jpeg\r\n\r\njpeg-bytes\r\n"));
    }

    #[tokio::test]
    async fn html_body_is_unexpected_response() {
        let (listener, url) = listen().await;
        let server = tokio::spawn(serve_once(
            listener,
            "502 Bad Gateway",
            "<html><body>Bad Gateway</body></html>",
        ));

        let err = client(&url)
            .send_photo("-500200", b"jpeg-bytes".to_vec(), "a.jpg", "caption")
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(
            err,
            TelegramError::UnexpectedResponse { status: 502 }
        ));
    }

    #[tokio::test]
    async fn transport_error_does_not_leak_token() {
        let (listener, url) = listen().await;
        // nothing is listening once the socket is closed
        drop(listener);

        let err = client(&url)
            .send_photo("-500200", b"jpeg-bytes".to_vec(), "a.jpg", "caption")
            .await
            .unwrap_err();

        assert!(matches!(err, TelegramError::Request(_)));
        assert!(!err.to_string().contains(TOKEN));
        assert!(!format!("{err:?}").contains(TOKEN));
    }

    #[test]
    fn guesses_photo_mime() {
        assert_eq!(photo_mime("2024-500200-Jane-Doe.jpg"), "image/jpeg");
        assert_eq!(photo_mime("a.JPEG"), "image/jpeg");
        assert_eq!(photo_mime("a.png"), "image/png");
        assert_eq!(photo_mime("no-extension"), "application/octet-stream");
    }
}
