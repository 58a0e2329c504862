//! Posts stored as HTML files with TOML front matter.
//!
//! ```text
//! +++
//! id = 3
//! title = "Living with cats"
//! tags = ["cats", "pets"]
//! categories = ["animals"]
//! +++
//! <p>Body HTML</p>
//! ```

use crate::domain::{CategoryId, Post, PostId, Scope, Tag, TagId};
use crate::error::{LinkerError, Result};
use crate::infrastructure::repository::{write_atomic, ContentRepository};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const FRONT_MATTER_DELIMITER: &str = "+++";

#[derive(Debug, Deserialize)]
struct FrontMatter {
    id: u64,
    #[serde(default)]
    title: String,
    slug: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    categories: Vec<String>,
}

/// A post together with where it lives on disk
#[derive(Debug, Clone)]
struct PostFile {
    path: PathBuf,
    /// Front matter including both delimiter lines, kept verbatim on rewrite
    header: String,
    slug: String,
    post: Post,
}

/// All posts of a site, loaded into memory and written back one by one
#[derive(Debug, Clone)]
pub struct SiteContent {
    base_url: String,
    posts: BTreeMap<PostId, PostFile>,
}

impl SiteContent {
    /// Load every `.html` post below `posts_dir`, skipping dot directories
    pub fn load(posts_dir: &Path, base_url: &str) -> Result<Self> {
        let mut posts = BTreeMap::new();
        let mut slugs: HashMap<String, PostId> = HashMap::new();

        if posts_dir.is_dir() {
            let walker = WalkDir::new(posts_dir)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| {
                    entry.depth() == 0
                        || !entry.file_type().is_dir()
                        || entry
                            .file_name()
                            .to_str()
                            .is_none_or(|name| !name.starts_with('.'))
                });

            for entry in walker {
                let entry = entry.map_err(|e| LinkerError::Io(e.into()))?;
                if !entry.file_type().is_file() || !is_post_file(entry.path()) {
                    continue;
                }

                let file = read_post_file(entry.path())?;
                if posts.contains_key(&file.post.id) {
                    return Err(LinkerError::DuplicatePostId {
                        id: file.post.id,
                        path: file.path,
                    });
                }
                if let Some(&other) = slugs.get(&file.slug) {
                    return Err(LinkerError::DuplicateSlug {
                        slug: file.slug,
                        other,
                        path: file.path,
                    });
                }
                slugs.insert(file.slug.clone(), file.post.id);
                posts.insert(file.post.id, file);
            }
        }

        debug!(count = posts.len(), dir = %posts_dir.display(), "loaded posts");

        Ok(SiteContent {
            base_url: base_url.trim_end_matches('/').to_string(),
            posts,
        })
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// All posts in ascending id order
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values().map(|file| &file.post)
    }

    /// File backing a post
    pub fn path_of(&self, id: PostId) -> Option<&Path> {
        self.posts.get(&id).map(|file| file.path.as_path())
    }

    fn file(&self, id: PostId) -> Result<&PostFile> {
        self.posts.get(&id).ok_or(LinkerError::PostNotFound(id))
    }
}

impl ContentRepository for SiteContent {
    fn get_post(&self, id: PostId) -> Result<Post> {
        Ok(self.file(id)?.post.clone())
    }

    fn list_posts(&self, scope: &Scope) -> Result<Vec<PostId>> {
        let ids = match scope {
            Scope::Post(id) => self.posts.keys().filter(|key| *key == id).copied().collect(),
            Scope::Category(category) => self
                .posts()
                .filter(|post| post.in_category(category))
                .map(|post| post.id)
                .collect(),
            Scope::All => self.posts.keys().copied().collect(),
        };
        Ok(ids)
    }

    fn posts_with_tag(&self, tag: &TagId, exclude: PostId) -> Result<Vec<PostId>> {
        Ok(self
            .posts()
            .filter(|post| post.id != exclude && post.has_tag(tag))
            .map(|post| post.id)
            .collect())
    }

    fn permalink(&self, id: PostId) -> Result<String> {
        let file = self.file(id)?;
        Ok(format!("{}/{}/", self.base_url, file.slug))
    }

    fn update_body(&mut self, id: PostId, body: &str) -> Result<()> {
        let file = self
            .posts
            .get_mut(&id)
            .ok_or(LinkerError::PostNotFound(id))?;

        let mut contents = String::with_capacity(file.header.len() + body.len());
        contents.push_str(&file.header);
        contents.push_str(body);
        write_atomic(&file.path, &contents)?;

        file.post.body = body.to_string();
        Ok(())
    }
}

fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}

fn is_slug_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.' | '~' | '/')
}

fn read_post_file(path: &Path) -> Result<PostFile> {
    let contents = fs::read_to_string(path)?;
    let invalid = |message: String| LinkerError::InvalidPost {
        path: path.to_path_buf(),
        message,
    };

    let (header, front, body) = split_front_matter(&contents)
        .ok_or_else(|| invalid("missing +++ front matter block".to_string()))?;
    let front: FrontMatter =
        toml::from_str(front).map_err(|e| invalid(format!("bad front matter: {}", e)))?;

    let slug = match front.slug {
        Some(slug) if !slug.trim().is_empty() => slug.trim().trim_matches('/').to_string(),
        _ => path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string(),
    };
    if slug.is_empty() || !slug.chars().all(is_slug_char) {
        return Err(invalid(format!(
            "slug '{}' may only contain letters, digits and - _ . ~ /",
            slug
        )));
    }

    let post = Post {
        id: PostId(front.id),
        title: front.title,
        body: body.to_string(),
        tags: front
            .tags
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| Tag::new(name.trim()))
            .collect(),
        categories: front
            .categories
            .iter()
            .map(|name| CategoryId::from_name(name))
            .collect(),
    };

    Ok(PostFile {
        path: path.to_path_buf(),
        header: header.to_string(),
        slug,
        post,
    })
}

/// Split a post file into (header with delimiters, front matter, body)
fn split_front_matter(contents: &str) -> Option<(&str, &str, &str)> {
    let rest = contents.strip_prefix(FRONT_MATTER_DELIMITER)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;
    let front_start = contents.len() - rest.len();

    let mut offset = front_start;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FRONT_MATTER_DELIMITER {
            let header_end = offset + line.len();
            return Some((
                &contents[..header_end],
                &contents[front_start..offset],
                &contents[header_end..],
            ));
        }
        offset += line.len();
    }

    None
}
