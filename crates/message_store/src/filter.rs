//! Field-equality filters for lookups and bulk deletes.

/// Filter options for finding or deleting users.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Match users whose username is any of these. Empty matches all users.
    pub usernames: Vec<String>,
}

impl UserFilter {
    /// Filter on a single username.
    pub fn username(username: impl Into<String>) -> Self {
        Self {
            usernames: vec![username.into()],
        }
    }

    /// Returns true if the user passes the filter.
    pub fn matches(&self, user: &entities::User) -> bool {
        self.usernames.is_empty() || self.usernames.iter().any(|u| *u == user.username)
    }
}

/// Filter options for finding or deleting messages.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    /// Match messages whose title is any of these. Empty matches any title.
    pub titles: Vec<String>,
    /// Match messages written by this user.
    pub author: Option<String>,
}

impl MessageFilter {
    /// Filter on a single title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            titles: vec![title.into()],
            ..Default::default()
        }
    }

    /// Filter on the author.
    pub fn author(author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..Default::default()
        }
    }

    /// Returns true if the message passes the filter.
    pub fn matches(&self, message: &entities::Message) -> bool {
        (self.titles.is_empty() || self.titles.iter().any(|t| *t == message.title))
            && self
                .author
                .as_ref()
                .is_none_or(|author| message.author.as_ref() == Some(author))
    }
}
