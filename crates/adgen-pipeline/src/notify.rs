//! Share link for finished videos.

const SUBJECT: &str = "Your SocialAds GenAI Campaign";

/// Build a `mailto:` link that shares the video with `address`.
pub fn mailto_link(address: &str, video_locator: &str) -> String {
    let body = format!(
        "Here is your AI generated video ad:\n\n{}\n\nGenerated with SocialAds GenAI.",
        video_locator
    );
    format!(
        "mailto:{}?subject={}&body={}",
        address.trim(),
        urlencoding::encode(SUBJECT),
        urlencoding::encode(&body)
    )
}
