//! HTTP boundary adapter for rendered images.

use std::io::Write;

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderValue, Response, StatusCode};

use super::labeler::RenderResult;
use crate::error::LabelError;

impl RenderResult {
    /// Build a `200 OK` response carrying the encoded image.
    pub fn to_http_response(&self) -> Response<Bytes> {
        let body = self.to_bytes();
        let mut response = Response::new(body);
        *response.status_mut() = StatusCode::OK;
        let headers = response.headers_mut();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(self.format().content_type()),
        );
        headers.insert(CONTENT_LENGTH, HeaderValue::from(self.bytes().len()));
        response
    }

    /// Write CGI-style header lines, a blank line, then the image bytes.
    pub fn write_http_response<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), LabelError> {
        write!(out, "Content-Type: {}\r\n", self.format().content_type())?;
        write!(out, "Content-Length: {}\r\n\r\n", self.bytes().len())?;
        out.write_all(self.bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Plain-text error response for a failed render.
pub fn error_response(err: &LabelError) -> Response<Bytes> {
    let status = StatusCode::from_u16(err.to_http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = Response::new(Bytes::from(err.to_string()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
