use std::io;

use ramhorns::Template;
use spdlog::warn;

use crate::dates::{format_long_date, parse_post_date, DateStyle};
use crate::feed::{FeedEntry, FeedSelection};
use crate::view::{compile, view_tags, ViewTag};

#[derive(ramhorns::Content)]
struct HomePage<'a> {
    site_title: &'a str,
    post_list: Vec<FeedItem>,
    no_posts: bool,
    has_more: bool,
}

#[derive(ramhorns::Content)]
struct FeedItem {
    date: String,
    formatted_date: String,
    link: String,
    title: String,
    summary: String,
    tags: Vec<ViewTag>,
    display_minutes: u32,
}

pub struct HomeRenderer {
    template: Template<'static>,
    locale: String,
}

impl HomeRenderer {
    pub fn new(home_tpl_src: String, locale: &str) -> io::Result<HomeRenderer> {
        Ok(HomeRenderer {
            template: compile(home_tpl_src, "home")?,
            locale: locale.to_string(),
        })
    }

    fn feed_item(&self, entry: &FeedEntry) -> FeedItem {
        let post = entry.post;
        let formatted_date = match parse_post_date(&post.date) {
            Ok(date) => format_long_date(&date, &self.locale, DateStyle::Long),
            Err(e) => {
                warn!("Showing raw date for {}: {}", post.slug, e);
                post.date.clone()
            }
        };

        FeedItem {
            date: post.date.clone(),
            formatted_date,
            link: post.link(),
            title: post.title.clone(),
            summary: post.summary.clone(),
            tags: view_tags(&post.tags),
            display_minutes: entry.display_minutes,
        }
    }

    pub fn render(&self, selection: &FeedSelection, site_title: &str) -> String {
        let post_list = selection.shown.iter()
            .map(|entry| self.feed_item(entry))
            .collect();

        self.template.render(&HomePage {
            site_title,
            post_list,
            no_posts: selection.is_empty(),
            has_more: selection.has_more,
        })
    }
}
