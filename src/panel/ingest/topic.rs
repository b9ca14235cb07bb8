/// Where an inbound topic goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TopicRoute<'a> {
    /// `<prefix>/<control_suffix>/<command>`
    Control { command: &'a str },
    /// Anything else; `source` is the topic tail after the prefix.
    Data { source: &'a str },
}

/// `base` is the subscription prefix without trailing separators.
pub fn classify<'a>(topic: &'a str, base: &str, control_suffix: &str) -> TopicRoute<'a> {
    let rest = topic
        .strip_prefix(base)
        .and_then(|rest| if base.is_empty() { Some(rest) } else { rest.strip_prefix('/') })
        .unwrap_or(topic);

    let control_suffix = control_suffix.trim_matches('/');
    if !control_suffix.is_empty() {
        if let Some(command) = rest
            .strip_prefix(control_suffix)
            .and_then(|tail| tail.strip_prefix('/'))
        {
            return TopicRoute::Control { command };
        }
        if rest == control_suffix {
            return TopicRoute::Control { command: "" };
        }
    }

    TopicRoute::Data { source: rest }
}
