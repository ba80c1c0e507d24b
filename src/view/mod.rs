use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::tags::TagLink;

pub mod home_renderer;
pub mod list_renderer;
pub mod post_renderer;

#[derive(ramhorns::Content)]
pub(crate) struct ViewTag {
    label: String,
    href: String,
}

impl From<TagLink> for ViewTag {
    fn from(link: TagLink) -> Self {
        ViewTag {
            label: link.label,
            href: link.href,
        }
    }
}

pub(crate) fn view_tags(tags: &[String]) -> Vec<ViewTag> {
    tags.iter().map(|t| TagLink::from(t).into()).collect()
}

pub(crate) fn compile(tpl_src: String, name: &str) -> io::Result<Template<'static>> {
    match Template::new(tpl_src) {
        Ok(template) => Ok(template),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing {} template: {}", name, e))),
    }
}
