use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use chrono::NaiveDate;
use spdlog::{debug, warn};

use crate::dates::parse_post_date;
use crate::post::{NavLink, Post};
use crate::tags::tag_slug;

/// Posts of the site, newest first, as resolved by the content build.
pub struct ContentIndex {
    posts: Vec<Post>,
    slug_to_pos: HashMap<String, usize>,
    path_to_pos: HashMap<String, usize>,
}

impl ContentIndex {
    pub fn from_file(path: &Path) -> io::Result<ContentIndex> {
        let buf = match fs::read_to_string(path) {
            Ok(buf) => buf,
            Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening content index {}: {}", path.display(), e))),
        };
        Self::from_string(&buf)
    }

    pub fn from_string(buf: &str) -> io::Result<ContentIndex> {
        let posts: Vec<Post> = match serde_json::from_str(buf) {
            Ok(posts) => posts,
            Err(e) => return Err(io::Error::new(
                ErrorKind::InvalidData, format!("Error parsing content index: {}", e))),
        };
        Ok(Self::from_posts(posts))
    }

    pub fn from_posts(posts: Vec<Post>) -> ContentIndex {
        let mut posts: Vec<Post> = posts.into_iter()
            .filter(|post| {
                if post.draft {
                    debug!("Skipping draft {}", post);
                }
                !post.draft
            })
            .collect();

        // Newest first. Unparseable dates sink to the end, in their raw order
        posts.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));

        let mut slug_to_pos = HashMap::with_capacity(posts.len());
        let mut path_to_pos = HashMap::with_capacity(posts.len());
        let mut unique = Vec::with_capacity(posts.len());
        for post in posts {
            let path = post.path.trim_matches('/').to_string();
            if slug_to_pos.contains_key(&post.slug) || path_to_pos.contains_key(&path) {
                warn!("Duplicated slug or path, keeping the newest post. Skipped {}", post);
                continue;
            }
            slug_to_pos.insert(post.slug.clone(), unique.len());
            path_to_pos.insert(path, unique.len());
            unique.push(post);
        }

        ContentIndex {
            posts: unique,
            slug_to_pos,
            path_to_pos,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Looks a post up by the path its pages are served under, e.g.
    /// `blog/nested/part-one`. Surrounding slashes are ignored.
    pub fn find_by_path(&self, path: &str) -> Option<&Post> {
        self.path_to_pos.get(path.trim_matches('/')).map(|&pos| &self.posts[pos])
    }

    /// Returns `(prev, next)` for a post: prev is the next older post, next
    /// the next newer one. `None` when the slug is unknown.
    pub fn siblings(&self, slug: &str) -> Option<(Option<NavLink>, Option<NavLink>)> {
        let &pos = self.slug_to_pos.get(slug)?;
        let prev = self.posts.get(pos + 1).map(NavLink::from);
        let next = pos.checked_sub(1)
            .and_then(|p| self.posts.get(p))
            .map(NavLink::from);
        Some((prev, next))
    }

    /// Posts carrying a tag, compared by slug.
    pub fn with_tag(&self, slug: &str) -> Vec<&Post> {
        self.posts.iter()
            .filter(|post| post.tags.iter().any(|t| tag_slug(t) == slug))
            .collect()
    }

    /// Tags and how many posts use them, most used first. Tags are grouped
    /// by slug under the first label seen, and counted once per post.
    pub fn tag_counts(&self) -> Vec<(String, u32)> {
        let mut tag_map: HashMap<String, (&str, u32)> = HashMap::new();
        for post in self.posts.iter() {
            let mut seen = HashSet::new();
            for tag in post.tags.iter() {
                let slug = tag_slug(tag);
                if !seen.insert(slug.clone()) {
                    continue;
                }
                tag_map.entry(slug).or_insert((tag.as_str(), 0)).1 += 1;
            }
        }

        let mut tag_list: Vec<(String, u32)> = tag_map.into_values()
            .map(|(label, count)| (label.to_string(), count))
            .collect();
        tag_list.sort_by(|(ka, va), (kb, vb)| vb.cmp(va).then_with(|| ka.cmp(kb)));
        tag_list
    }
}

fn sort_key(post: &Post) -> (Option<NaiveDate>, &str) {
    (parse_post_date(&post.date).ok(), post.date.as_str())
}
