use chrono::{DateTime, FixedOffset, Utc};
use escaper::encode_minimal;
use nw_core::{Article, NewPostsByBoard};

/// Display zone of the message timestamp.
pub fn kst() -> FixedOffset {
    // 9 hours is always within FixedOffset range
    FixedOffset::east_opt(9 * 3600).expect("UTC+9 is a valid offset")
}

pub fn now_kst() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&kst())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Builds the notification for one run. Boards without new posts are left out.
pub fn render(posts: &NewPostsByBoard, at: DateTime<FixedOffset>) -> RenderedMessage {
    let stamp = at.format("%Y-%m-%d %H:%M").to_string();
    RenderedMessage {
        subject: subject(posts, &stamp),
        text: text_body(posts, &stamp),
        html: html_body(posts, &stamp),
    }
}

fn subject(posts: &NewPostsByBoard, stamp: &str) -> String {
    let tags: String = posts
        .active()
        .map(|b| format!("[{}]", b.board.tag()))
        .collect();
    format!(
        "{} [명지대 공지 알림] 새 게시물 {}건 ({} KST)",
        tags,
        posts.total(),
        stamp
    )
}

fn summary_of(post: &Article) -> Option<&str> {
    post.summary.as_deref().filter(|s| !s.is_empty())
}

fn text_body(posts: &NewPostsByBoard, stamp: &str) -> String {
    let mut lines = vec![format!("명지대학교 공지 새 글 알림 ({} KST)", stamp), String::new()];

    for board_posts in posts.active() {
        let name = &board_posts.board.name;
        lines.push(format!("== {} ({}건) ==", name, board_posts.posts.len()));
        for post in &board_posts.posts {
            let date = post
                .date
                .as_deref()
                .map(|d| format!("({}) ", d))
                .unwrap_or_default();
            lines.push(format!("- [{}] {}{}", name, date, post.title));
            if let Some(summary) = summary_of(post) {
                lines.push(format!("  {}", summary));
            }
            lines.push(format!("  {}", post.url));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn html_body(posts: &NewPostsByBoard, stamp: &str) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html><body style=\"font-family: sans-serif\">\n");
    html.push_str(&format!(
        "<h2>명지대학교 공지 새 글 알림 <small>({} KST)</small></h2>\n",
        encode_minimal(stamp)
    ));

    for board_posts in posts.active() {
        html.push_str(&format!(
            "<h3>{} ({}건)</h3>\n<ul>\n",
            encode_minimal(&board_posts.board.name),
            board_posts.posts.len()
        ));
        for post in &board_posts.posts {
            html.push_str("<li>");
            if let Some(date) = &post.date {
                html.push_str(&format!("<span>({})</span> ", encode_minimal(date)));
            }
            html.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                encode_minimal(&post.url),
                encode_minimal(&post.title)
            ));
            if let Some(summary) = summary_of(post) {
                html.push_str(&format!("<br><small>{}</small>", encode_minimal(summary)));
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body></html>\n");
    html
}
