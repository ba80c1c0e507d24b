use std::io;
use std::io::ErrorKind;

use markdown::Options;
use ramhorns::Template;

use crate::comments::CommentActivation;
use crate::post::{page_link, NavLink, Post};
use crate::presenter::PostView;
use crate::view::{compile, view_tags, ViewTag};

#[derive(ramhorns::Content)]
struct ViewLink {
    link: String,
    title: String,
}

impl From<&NavLink> for ViewLink {
    fn from(nav: &NavLink) -> Self {
        ViewLink {
            link: nav.link(),
            title: nav.title.clone(),
        }
    }
}

#[derive(ramhorns::Content)]
struct ViewAttribute<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewComments<'a> {
    script_src: &'a str,
    attributes: Vec<ViewAttribute<'a>>,
}

impl<'a> From<&'a CommentActivation> for ViewComments<'a> {
    fn from(activation: &'a CommentActivation) -> Self {
        ViewComments {
            script_src: activation.script_src,
            attributes: activation.attributes.iter()
                .map(|a| ViewAttribute { name: a.name, value: a.value.as_str() })
                .collect(),
        }
    }
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    site_title: &'a str,
    post_title: &'a str,
    date: &'a str,
    formatted_date: &'a str,
    display_minutes: u32,
    tags: Vec<ViewTag>,
    has_tags: bool,
    post_content: String,
    back_link: String,
    prev: Option<ViewLink>,
    next: Option<ViewLink>,
    has_nav: bool,
    comments: Option<ViewComments<'a>>,
}

pub struct PostRenderer {
    template: Template<'static>,
}

impl PostRenderer {
    pub fn new(view_tpl_src: String) -> io::Result<PostRenderer> {
        Ok(PostRenderer {
            template: compile(view_tpl_src, "post view")?,
        })
    }

    fn render_markdown(md_text: &str) -> io::Result<String> {
        match markdown::to_html_with_options(md_text, &Options::gfm()) {
            Ok(x) => Ok(x),
            Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.reason)),
        }
    }

    pub fn render(&self, site_title: &str, post: &Post, view: &PostView) -> io::Result<String> {
        let prev = view.prev_link.as_ref().filter(|l| !l.path.is_empty()).map(ViewLink::from);
        let next = view.next_link.as_ref().filter(|l| !l.path.is_empty()).map(ViewLink::from);

        let rendered_page = self.template.render(&ViewItem {
            site_title,
            post_title: &view.title,
            date: &view.date,
            formatted_date: &view.formatted_date,
            display_minutes: view.display_minutes,
            tags: view_tags(&view.tag_labels),
            has_tags: !view.tag_labels.is_empty(),
            post_content: Self::render_markdown(&post.body)?,
            back_link: page_link(&view.back_path),
            has_nav: prev.is_some() || next.is_some(),
            prev,
            next,
            comments: view.comments.as_ref().map(ViewComments::from),
        });

        Ok(rendered_page)
    }
}
