//! HTML fragments written into page regions. Every interpolated value goes
//! through [`escape`].

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Error,
}

/// A centered status line: loading placeholders, empty states, errors.
pub fn message(text: &str, tone: Tone) -> String {
    let class = match tone {
        Tone::Info => "text-center p-4",
        Tone::Error => "text-red-500 text-center p-4",
    };
    format!(r#"<p class="{}">{}</p>"#, class, escape(text))
}

/// A status line spanning the whole archive grid.
pub fn grid_message(text: &str, tone: Tone) -> String {
    let class = match tone {
        Tone::Info => "text-center col-span-full p-5 text-slate-400",
        Tone::Error => "text-red-500 text-center col-span-full p-5",
    };
    format!(r#"<p class="{}">{}</p>"#, class, escape(text))
}

pub fn image_tile(url: &str, alt: &str) -> String {
    format!(
        r#"<div class="flex flex-col gap-3"><img class="w-full aspect-square object-cover rounded-xl" src="{}" alt="{}" loading="lazy"></div>"#,
        escape(url),
        escape(alt)
    )
}

pub fn image_grid<S: AsRef<str>>(urls: &[S], alt: &str) -> String {
    let tiles: String = urls.iter().map(|u| image_tile(u.as_ref(), alt)).collect();
    format!(
        r#"<div class="grid grid-cols-[repeat(auto-fit,minmax(158px,1fr))] gap-3 p-4">{}</div>"#,
        tiles
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_specials() {
        assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&lt;/a&gt;");
    }

    #[test]
    fn test_error_message_is_escaped() {
        let html = message("Error: <oops>", Tone::Error);
        assert_eq!(html, r#"<p class="text-red-500 text-center p-4">Error: &lt;oops&gt;</p>"#);
    }

    #[test]
    fn test_grid_has_one_tile_per_url() {
        let html = image_grid(&["http://x/1.png", "http://x/2.png"], "concept");
        assert_eq!(html.matches("<img ").count(), 2);
        assert!(html.contains(r#"src="http://x/2.png""#));
    }

    #[test]
    fn test_tile_url_cannot_break_attribute() {
        let html = image_tile("http://x/\"onerror=\"alert(1)", "a");
        assert!(html.contains("src=\"http://x/&quot;onerror=&quot;alert(1)\""));
    }
}
