//! Release comments.

// self
use crate::{
	_prelude::*,
	api::{
		Client, ReleaseRef,
		endpoint::{Access, Endpoint, EndpointRequest},
		require_rating,
	},
	auth::Token,
	http::ApiHttpClient,
	model::{Comment, PaginationList},
	oauth::TransportErrorMapper,
	pagination::Page,
};

/// Content of a new comment: text, a video + audio rating pair, or both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentOptions {
	/// Comment text.
	pub text: Option<String>,
	/// Video rating in `1..=10`.
	pub video_rating: Option<u8>,
	/// Audio rating in `1..=10`.
	pub audio_rating: Option<u8>,
}
impl CommentOptions {
	/// Comment with text only.
	pub fn text(text: impl Into<String>) -> Self {
		Self { text: Some(text.into()), ..Self::default() }
	}

	/// Comment with ratings only.
	pub fn ratings(video: u8, audio: u8) -> Self {
		Self { text: None, video_rating: Some(video), audio_rating: Some(audio) }
	}

	/// Adds ratings to the comment.
	pub fn with_ratings(mut self, video: u8, audio: u8) -> Self {
		self.video_rating = Some(video);
		self.audio_rating = Some(audio);

		self
	}

	/// Checks the contract and returns `(text, ratings)` ready to send.
	fn validate(&self) -> Result<(Option<&str>, Option<(u8, u8)>)> {
		let text = self.text.as_deref().filter(|text| !text.trim().is_empty());
		let ratings = match (self.video_rating, self.audio_rating) {
			(Some(video), Some(audio)) =>
				Some((require_rating("video_rating", video)?, require_rating("audio_rating", audio)?)),
			(None, None) => None,
			_ => return Err(Error::invalid_argument("video and audio ratings must be given together")),
		};

		if text.is_none() && ratings.is_none() {
			return Err(Error::invalid_argument("a comment needs text or both ratings"));
		}

		Ok((text, ratings))
	}
}

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists comments on a release.
	pub async fn comments(
		&self,
		release: &ReleaseRef,
		page: Page,
	) -> Result<PaginationList<Comment>> {
		self.call(Endpoint::COMMENTS_GET.operation, || {
			Ok(EndpointRequest::new(Endpoint::COMMENTS_GET)
				.query("id", release.checked_id()?)
				.query("type", release.kind())
				.page(page))
		})
		.await
	}

	/// Posts a comment on a release.
	pub async fn add_comment(
		&self,
		release: &ReleaseRef,
		options: &CommentOptions,
		token: &Token,
	) -> Result<Comment> {
		self.call(Endpoint::COMMENTS_ADD.operation, || {
			let (text, ratings) = options.validate()?;

			Ok(EndpointRequest::new(Endpoint::COMMENTS_ADD)
				.access(Access::Authenticated(token))
				.form("id", release.checked_id()?)
				.form("type", release.kind())
				.form_opt("text", text)
				.form_opt("video_rating", ratings.map(|(video, _)| video.to_string()))
				.form_opt("audio_rating", ratings.map(|(_, audio)| audio.to_string())))
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn comments_need_text_or_both_ratings() {
		assert!(CommentOptions::text("nice").validate().is_ok());
		assert_eq!(CommentOptions::ratings(7, 8).validate().ok(), Some((None, Some((7, 8)))));
		assert!(CommentOptions::default().validate().is_err());
		assert!(CommentOptions::text("  ").validate().is_err());
		assert!(
			CommentOptions { video_rating: Some(5), ..CommentOptions::text("x") }
				.validate()
				.is_err()
		);
		assert!(CommentOptions::ratings(0, 5).validate().is_err());
		assert!(CommentOptions::text("x").with_ratings(10, 11).validate().is_err());
	}
}
