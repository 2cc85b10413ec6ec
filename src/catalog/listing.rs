// src/catalog/listing.rs

//! Listing and ranking queries
//!
//! Each listing is a small function over one shared paginator. Public
//! listings only ever return published recipes; the owner listings scope to
//! the viewer.

use crate::catalog::guard::Viewer;
use crate::db::models::{Category, User, display_name};
use crate::error::{Error, Result};
use rusqlite::types::ToSql;
use rusqlite::{Connection, Row, named_params};
use serde::Serialize;
use tracing::debug;

/// Items per page on every listing
pub const PAGE_SIZE: usize = 10;

/// Newest and popular listings never reach past this many recipes
pub const RANKED_CAP: usize = 100;

/// Number of recipes in each index section
pub const INDEX_SIZE: usize = 10;

/// A recipe as it appears in a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub author_id: Option<i64>,
    pub author: String,
    pub photo: Option<String>,
    pub edit_date: String,
    pub pub_date: Option<String>,
    pub favourite_count: i64,
}

const SUMMARY_COLUMNS: &str = "r.id, r.title, r.status, r.author_id, u.username, r.photo, r.edit_date, r.pub_date,
        (SELECT COUNT(*) FROM favourites fc WHERE fc.recipe_id = r.id) AS favourite_count";

/// Default recipe ordering: newest publication first, then latest edit
const DEFAULT_ORDER: &str = "ORDER BY r.pub_date DESC, r.edit_date DESC";

const PUBLISHED: &str = "WHERE r.status = 'published'";

const PUBLISHED_AND_FAVOURITED: &str = "WHERE r.status = 'published'
    AND EXISTS (SELECT 1 FROM favourites f WHERE f.recipe_id = r.id)";

const POPULAR_ORDER: &str = "ORDER BY favourite_count DESC, r.pub_date DESC";

impl RecipeSummary {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let username: Option<String> = row.get(4)?;
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            status: row.get(2)?,
            author_id: row.get(3)?,
            author: display_name(username.as_deref()),
            photo: row.get(5)?,
            edit_date: row.get(6)?,
            pub_date: row.get(7)?,
            favourite_count: row.get(8)?,
        })
    }
}

/// One favourite in the owner's favourites list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavouriteEntry {
    pub recipe: RecipeSummary,
    pub created_at: String,
}

/// One page of a listing
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub num_pages: usize,
    pub total: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Offset/limit for one requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: usize,
    pub num_pages: usize,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

impl PageWindow {
    fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            page: self.number,
            num_pages: self.num_pages,
            total: self.total,
            has_next: self.number < self.num_pages,
            has_previous: self.number > 1,
        }
    }
}

/// Splits a (possibly capped) result set into pages
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    pub per_page: usize,
    pub cap: Option<usize>,
}

impl Paginator {
    pub const fn new(per_page: usize) -> Self {
        Self { per_page, cap: None }
    }

    pub const fn capped(per_page: usize, cap: usize) -> Self {
        Self {
            per_page,
            cap: Some(cap),
        }
    }

    /// Work out the window for `page` (1-based) over `total` rows
    ///
    /// Page 1 always exists, even for an empty list; any other page outside
    /// the range is not found.
    pub fn window(&self, total: usize, page: usize) -> Result<PageWindow> {
        let total = match self.cap {
            Some(cap) => total.min(cap),
            None => total,
        };
        let num_pages = total.div_ceil(self.per_page).max(1);

        if page == 0 || page > num_pages {
            return Err(Error::NotFound(format!("Page {page}")));
        }

        let offset = (page - 1) * self.per_page;
        let limit = self.per_page.min(total.saturating_sub(offset));
        Ok(PageWindow {
            number: page,
            num_pages,
            total,
            offset,
            limit,
        })
    }
}

/// Count, window, then fetch the rows for one page
fn fetch_page<T, F>(
    conn: &Connection,
    paginator: Paginator,
    page: usize,
    count_sql: &str,
    select_sql: &str,
    filter: &[(&str, &dyn ToSql)],
    map: F,
) -> Result<Page<T>>
where
    F: FnMut(&Row) -> rusqlite::Result<T>,
{
    let total: i64 = conn.query_row(count_sql, filter, |row| row.get(0))?;
    let window = paginator.window(usize::try_from(total).unwrap_or(0), page)?;
    debug!("Listing page {} of {} ({} rows)", window.number, window.num_pages, window.total);

    let limit = window.limit as i64;
    let offset = window.offset as i64;
    let mut params: Vec<(&str, &dyn ToSql)> = filter.to_vec();
    params.push((":limit", &limit));
    params.push((":offset", &offset));

    let mut stmt = conn.prepare(select_sql)?;
    let items = stmt
        .query_map(params.as_slice(), map)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(window.into_page(items))
}

fn summary_page(
    conn: &Connection,
    paginator: Paginator,
    page: usize,
    where_clause: &str,
    order: &str,
    filter: &[(&str, &dyn ToSql)],
) -> Result<Page<RecipeSummary>> {
    let count_sql = format!("SELECT COUNT(*) FROM recipes r {where_clause}");
    let select_sql = format!(
        "SELECT {SUMMARY_COLUMNS} FROM recipes r LEFT JOIN users u ON u.id = r.author_id
         {where_clause} {order} LIMIT :limit OFFSET :offset"
    );
    fetch_page(
        conn,
        paginator,
        page,
        &count_sql,
        &select_sql,
        filter,
        RecipeSummary::from_row,
    )
}

/// Published recipes, newest first, capped at 100
pub fn newest(conn: &Connection, page: usize) -> Result<Page<RecipeSummary>> {
    summary_page(
        conn,
        Paginator::capped(PAGE_SIZE, RANKED_CAP),
        page,
        PUBLISHED,
        DEFAULT_ORDER,
        &[],
    )
}

/// Published recipes with at least one favourite, most favourited first
///
/// Ties on favourite count go to the more recently published recipe.
/// Recipes nobody favourited are left out entirely.
pub fn popular(conn: &Connection, page: usize) -> Result<Page<RecipeSummary>> {
    summary_page(
        conn,
        Paginator::capped(PAGE_SIZE, RANKED_CAP),
        page,
        PUBLISHED_AND_FAVOURITED,
        POPULAR_ORDER,
        &[],
    )
}

/// Published recipes filed under a category
pub fn by_category(
    conn: &Connection,
    slug: &str,
    page: usize,
) -> Result<(Category, Page<RecipeSummary>)> {
    let category = Category::find_by_slug(conn, slug)?
        .ok_or_else(|| Error::NotFound(format!("Category {slug}")))?;

    let recipes = summary_page(
        conn,
        Paginator::new(PAGE_SIZE),
        page,
        "WHERE r.status = 'published'
           AND EXISTS (SELECT 1 FROM recipe_categories rc
                       WHERE rc.recipe_id = r.id AND rc.category_slug = :slug)",
        DEFAULT_ORDER,
        named_params! { ":slug": slug },
    )?;
    Ok((category, recipes))
}

/// Published recipes by one author
pub fn by_author(
    conn: &Connection,
    user_id: i64,
    page: usize,
) -> Result<(User, Page<RecipeSummary>)> {
    let user =
        User::find_by_id(conn, user_id)?.ok_or_else(|| Error::NotFound(format!("User {user_id}")))?;
    let recipes = authored(conn, user_id, "published", page)?;
    Ok((user, recipes))
}

fn authored(
    conn: &Connection,
    author_id: i64,
    status: &str,
    page: usize,
) -> Result<Page<RecipeSummary>> {
    summary_page(
        conn,
        Paginator::new(PAGE_SIZE),
        page,
        "WHERE r.status = :status AND r.author_id = :author",
        DEFAULT_ORDER,
        named_params! { ":status": status, ":author": author_id },
    )
}

/// The viewer's published recipes
pub fn my_recipes(conn: &Connection, viewer: &Viewer, page: usize) -> Result<Page<RecipeSummary>> {
    authored(conn, viewer.require_user()?, "published", page)
}

/// The viewer's drafts
pub fn my_drafts(conn: &Connection, viewer: &Viewer, page: usize) -> Result<Page<RecipeSummary>> {
    authored(conn, viewer.require_user()?, "draft", page)
}

/// The viewer's favourites, most recently favourited first
pub fn my_favourites(
    conn: &Connection,
    viewer: &Viewer,
    page: usize,
) -> Result<Page<FavouriteEntry>> {
    let user_id = viewer.require_user()?;
    let select_sql = format!(
        "SELECT {SUMMARY_COLUMNS}, f.created_at
         FROM favourites f
         JOIN recipes r ON r.id = f.recipe_id
         LEFT JOIN users u ON u.id = r.author_id
         WHERE f.user_id = :user
         ORDER BY f.created_at DESC, f.id DESC
         LIMIT :limit OFFSET :offset"
    );

    fetch_page(
        conn,
        Paginator::new(PAGE_SIZE),
        page,
        "SELECT COUNT(*) FROM favourites WHERE user_id = :user",
        &select_sql,
        named_params! { ":user": user_id },
        |row| {
            Ok(FavouriteEntry {
                recipe: RecipeSummary::from_row(row)?,
                created_at: row.get(9)?,
            })
        },
    )
}

/// Front page: latest and most popular published recipes
#[derive(Debug, Clone, Serialize)]
pub struct Index {
    pub latest: Vec<RecipeSummary>,
    pub popular: Vec<RecipeSummary>,
}

pub fn index(conn: &Connection) -> Result<Index> {
    let first_page = Paginator::new(INDEX_SIZE);
    let latest = summary_page(
        conn,
        first_page,
        1,
        PUBLISHED,
        DEFAULT_ORDER,
        &[],
    )?;
    let popular = summary_page(
        conn,
        first_page,
        1,
        PUBLISHED_AND_FAVOURITED,
        POPULAR_ORDER,
        &[],
    )?;
    Ok(Index {
        latest: latest.items,
        popular: popular.items,
    })
}
