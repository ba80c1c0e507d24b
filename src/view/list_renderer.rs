use std::io;

use ramhorns::Template;

use crate::dates::{format_long_date, parse_post_date, DateStyle};
use crate::post::Post;
use crate::tags::TagLink;
use crate::view::{compile, view_tags, ViewTag};

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    site_title: &'a str,
    heading: &'a str,
    post_list: Vec<PostItem>,
    no_posts: bool,
    tags: Vec<TagCount>,
    page_list: Vec<ViewPagination>,
    show_pagination: bool,
}

#[derive(ramhorns::Content)]
struct PostItem {
    date: String,
    formatted_date: String,
    link: String,
    title: String,
    summary: String,
    tags: Vec<ViewTag>,
}

#[derive(ramhorns::Content)]
struct TagCount {
    label: String,
    href: String,
    count: u32,
}

#[derive(ramhorns::Content)]
struct ViewPagination {
    current: bool,
    number: u32,
    link: String,
}

/// A page of a post listing: the full archive or a single tag.
pub struct ListPageInput<'a> {
    pub heading: &'a str,
    /// Path the `?page=` links are built on, e.g. `/blog/`
    pub base_link: &'a str,
    pub posts: &'a [&'a Post],
    pub cur_page: u32,
    pub page_count: u32,
    pub tags: &'a [(String, u32)],
}

pub struct ListRenderer {
    template: Template<'static>,
    locale: String,
}

impl ListRenderer {
    pub fn new(list_tpl_src: String, locale: &str) -> io::Result<ListRenderer> {
        Ok(ListRenderer {
            template: compile(list_tpl_src, "list")?,
            locale: locale.to_string(),
        })
    }

    pub fn render(&self, site_title: &str, input: &ListPageInput) -> String {
        let mut post_list = vec![];
        for post in input.posts {
            let formatted_date = parse_post_date(&post.date)
                .map(|date| format_long_date(&date, &self.locale, DateStyle::Long))
                .unwrap_or_else(|_| post.date.clone());
            post_list.push(PostItem {
                date: post.date.clone(),
                formatted_date,
                link: post.link(),
                title: post.title.clone(),
                summary: post.summary.clone(),
                tags: view_tags(&post.tags),
            });
        }

        let mut page_list: Vec<ViewPagination> = Vec::with_capacity(input.page_count as usize);
        for i in 1..=input.page_count {
            page_list.push(ViewPagination {
                current: i == input.cur_page,
                number: i,
                link: format!("{}?page={}", input.base_link, i),
            })
        }

        let tags = input.tags.iter()
            .map(|(tag, count)| {
                let link = TagLink::from(tag);
                TagCount {
                    label: link.label,
                    href: link.href,
                    count: *count,
                }
            })
            .collect();

        self.template.render(&ListPage {
            site_title,
            heading: input.heading,
            no_posts: post_list.is_empty(),
            post_list,
            tags,
            show_pagination: input.page_count > 1,
            page_list,
        })
    }
}
