//! Products and the static sticker catalog.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// URL-friendly handle (e.g. "surftocat").
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Product description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Image path.
    #[serde(default)]
    pub image: String,
    /// Shown on the home page.
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Create a new product with empty description and image.
    pub fn new(
        id: impl Into<ProductId>,
        slug: impl Into<String>,
        name: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            featured: false,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image path.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Mark as featured.
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }
}

/// Read-only product list, queryable by id, slug and featured flag.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The Octodeco sticker catalog.
    pub fn builtin() -> Self {
        let products = STICKERS
            .iter()
            .map(|s| {
                let product = Product::new(s.id, s.slug, s.name, Money::from_cents(s.cents))
                    .with_description(s.description)
                    .with_image(format!("/images/products/{}", s.image));
                if s.featured {
                    product.featured()
                } else {
                    product
                }
            })
            .collect();
        Self { products }
    }

    /// All products, in catalog order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product by id, failing with [`CommerceError::ProductNotFound`].
    pub fn require(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Look up a product by slug.
    pub fn by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Products flagged as featured.
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

struct Sticker {
    id: &'static str,
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    cents: i64,
    image: &'static str,
    featured: bool,
}

const STICKERS: &[Sticker] = &[
    Sticker {
        id: "1",
        slug: "original",
        name: "Original Octocat",
        description: "The classic Octocat sticker that started it all. A must-have for any GitHub fan.",
        cents: 499,
        image: "original.png",
        featured: true,
    },
    Sticker {
        id: "2",
        slug: "professortocat",
        name: "Professortocat",
        description: "The scholarly Octocat, perfect for the academic coder in your life.",
        cents: 599,
        image: "Professortocat_v2.png",
        featured: true,
    },
    Sticker {
        id: "3",
        slug: "surftocat",
        name: "Surftocat",
        description: "Catch the wave with this rad surfing Octocat sticker.",
        cents: 599,
        image: "surftocat.png",
        featured: true,
    },
    Sticker {
        id: "4",
        slug: "jetpacktocat",
        name: "Jetpacktocat",
        description: "Blast off into the future with Jetpacktocat. To infinity and beyond!",
        cents: 599,
        image: "jetpacktocat.png",
        featured: true,
    },
    Sticker {
        id: "5",
        slug: "dinotocat",
        name: "Dinotocat",
        description: "A prehistoric take on the beloved Octocat. Roar!",
        cents: 599,
        image: "dinotocat.png",
        featured: false,
    },
    Sticker {
        id: "6",
        slug: "mona-the-rivetertocat",
        name: "Mona the Rivetertocat",
        description: "We can code it! Inspired by the iconic Rosie the Riveter.",
        cents: 599,
        image: "mona-the-rivetertocat.png",
        featured: false,
    },
    Sticker {
        id: "7",
        slug: "bouncercat",
        name: "Bouncercat",
        description: "The toughest Octocat on the block. No bugs allowed!",
        cents: 499,
        image: "bouncercat.png",
        featured: false,
    },
    Sticker {
        id: "8",
        slug: "terracottocat",
        name: "Terracottocat",
        description: "An ancient warrior Octocat, standing guard over your code.",
        cents: 599,
        image: "Terracottocat_Single.png",
        featured: false,
    },
    Sticker {
        id: "9",
        slug: "cherryontop-o-cat",
        name: "Cherry on Top Octocat",
        description: "Sweet as can be! The perfect finishing touch.",
        cents: 499,
        image: "cherryontop-o-cat.png",
        featured: false,
    },
    Sticker {
        id: "10",
        slug: "femalecodertocat",
        name: "Female Codertocat",
        description: "Celebrating women in tech with this awesome coder Octocat.",
        cents: 599,
        image: "femalecodertocat.png",
        featured: false,
    },
    Sticker {
        id: "11",
        slug: "inflatocat",
        name: "Inflatocat",
        description: "Float through your day with this buoyant Octocat.",
        cents: 499,
        image: "inflatocat.png",
        featured: false,
    },
    Sticker {
        id: "12",
        slug: "justicetocat",
        name: "Justicetocat",
        description: "Fighting for code justice everywhere. The hero we need.",
        cents: 599,
        image: "justicetocat.jpg",
        featured: false,
    },
    Sticker {
        id: "13",
        slug: "manufacturetocat",
        name: "Manufacturetocat",
        description: "Building the future, one commit at a time.",
        cents: 499,
        image: "manufacturetocat.png",
        featured: false,
    },
    Sticker {
        id: "14",
        slug: "oktobercat",
        name: "Oktobercat",
        description: "Prost! Celebrate Oktoberfest with this festive Octocat.",
        cents: 599,
        image: "oktobercat.png",
        featured: false,
    },
    Sticker {
        id: "15",
        slug: "red-polo",
        name: "Red Polo Octocat",
        description: "Casual Friday vibes with this stylish red polo Octocat.",
        cents: 499,
        image: "red-polo.png",
        featured: false,
    },
    Sticker {
        id: "16",
        slug: "skatetocat",
        name: "Skatetocat",
        description: "Kickflip your way through code reviews with Skatetocat.",
        cents: 599,
        image: "skatetocat.png",
        featured: false,
    },
    Sticker {
        id: "17",
        slug: "sponsortocat",
        name: "Sponsortocat",
        description: "Show your support for open source with Sponsortocat.",
        cents: 499,
        image: "sponsortocat.png",
        featured: false,
    },
    Sticker {
        id: "18",
        slug: "vinyltocat",
        name: "Vinyltocat",
        description: "Spin some tunes with this music-loving Octocat DJ.",
        cents: 599,
        image: "vinyltocat.png",
        featured: false,
    },
    Sticker {
        id: "19",
        slug: "welcometocat",
        name: "Welcometocat",
        description: "A warm welcome to the GitHub community!",
        cents: 499,
        image: "welcometocat.png",
        featured: false,
    },
    Sticker {
        id: "20",
        slug: "yogitocat",
        name: "Yogitocat",
        description: "Find your inner peace with this zen Octocat. Namaste.",
        cents: 599,
        image: "yogitocat.png",
        featured: false,
    },
];
