//! Site navigation.

/// A top-level page of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Shop,
    Cart,
    Contact,
}

impl Page {
    /// Every page, in navigation order.
    pub const ALL: [Self; 3] = [Self::Shop, Self::Cart, Self::Contact];

    /// Identifier used in `data-page` / `data-link` attributes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shop => "shop",
            Self::Cart => "cart",
            Self::Contact => "contact",
        }
    }

    #[must_use]
    pub const fn href(self) -> &'static str {
        match self {
            Self::Shop => "/",
            Self::Cart => "/cart",
            Self::Contact => "/contact",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shop => "Shop",
            Self::Cart => "Cart",
            Self::Contact => "Contact",
        }
    }
}

/// One navigation link as rendered in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub link: &'static str,
    pub href: &'static str,
    pub label: &'static str,
    /// Rendered with class `active` and `aria-current="page"`.
    pub active: bool,
}

/// Navigation links with exactly the current page marked active.
#[must_use]
pub fn nav_links(current: Page) -> Vec<NavLink> {
    Page::ALL
        .into_iter()
        .map(|page| NavLink {
            link: page.as_str(),
            href: page.href(),
            label: page.label(),
            active: page == current,
        })
        .collect()
}

/// Shared header data for every full page.
#[derive(Debug, Clone)]
pub struct Layout {
    pub page: &'static str,
    pub title: String,
    pub nav: Vec<NavLink>,
    pub cart_count: u64,
}

impl Layout {
    #[must_use]
    pub fn new(page: Page, cart_count: u64) -> Self {
        Self {
            page: page.as_str(),
            title: format!("{} | Corner Shop", page.label()),
            nav: nav_links(page),
            cart_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_current_page_is_active() {
        for current in Page::ALL {
            let links = nav_links(current);
            let active: Vec<&str> = links.iter().filter(|l| l.active).map(|l| l.link).collect();
            assert_eq!(active, vec![current.as_str()]);
        }
    }

    #[test]
    fn test_layout_title() {
        let layout = Layout::new(Page::Cart, 3);
        assert_eq!(layout.title, "Cart | Corner Shop");
        assert_eq!(layout.page, "cart");
        assert_eq!(layout.cart_count, 3);
    }
}
