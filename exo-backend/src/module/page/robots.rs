//! Minimal robots.txt check

/// Location of robots.txt for the host serving `page_url`
pub fn robots_url(page_url: &reqwest::Url) -> Option<reqwest::Url> {
    page_url.join("/robots.txt").ok()
}

/// `false` only when a group for `*` or for `agent` disallows the whole site.
///
/// Path-specific rules are ignored; a blanket `Disallow: /` is the only
/// thing that stops a scrape.
pub fn allowed_by_robots(robots_txt: &str, agent: &str) -> bool {
    let agent = agent.to_lowercase();
    let mut applicable = false;

    for line in robots_txt.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim().to_lowercase().as_str() {
            "user-agent" => {
                applicable = value == "*" || value.to_lowercase().contains(&agent);
            }
            "disallow" if applicable && value == "/" => return false,
            _ => {}
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blanket_disallow_for_everyone() {
        let robots = "User-agent: *\nDisallow: /\n";
        assert!(!allowed_by_robots(robots, "ExoplanetResearch"));
    }

    #[test]
    fn test_path_rules_and_other_agents_ignored() {
        let robots = "# comment\n\
                      User-agent: BadBot\n\
                      Disallow: /\n\
                      \n\
                      User-agent: *\n\
                      Disallow: /search\n\
                      Allow: /\n";
        assert!(allowed_by_robots(robots, "ExoplanetResearch"));
        assert!(allowed_by_robots("", "ExoplanetResearch"));
        assert!(allowed_by_robots("not a robots file", "ExoplanetResearch"));
    }

    #[test]
    fn test_group_for_our_agent() {
        let robots = "User-agent: exoplanetresearch/1.0\nDisallow: /\n";
        assert!(!allowed_by_robots(robots, "ExoplanetResearch"));
    }

    #[test]
    fn test_robots_url() {
        let page = reqwest::Url::parse("https://science.nasa.gov/exoplanets/?x=1").unwrap();
        assert_eq!(
            robots_url(&page).map(|u| u.to_string()).as_deref(),
            Some("https://science.nasa.gov/robots.txt")
        );
    }
}
