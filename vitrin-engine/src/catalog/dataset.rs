//! Built-in demo catalog
//!
//! The fixture dataset the storefront ships with: 6 root categories,
//! 8 brands and 8 products with Turkish display strings. A production
//! deployment replaces this with a catalog loaded from its real
//! source; the tests and the example session run against this one.

use super::CatalogData;
use shared::models::{
    Brand, Category, Product, ProductImage, ProductStatus, ProductVariant, VariantOption,
};

fn category(id: i64, name: &str, slug: &str, parent_id: Option<i64>) -> Category {
    Category {
        id,
        name: name.into(),
        slug: slug.into(),
        parent_id,
        image_url: None,
        children: Vec::new(),
    }
}

fn root_category(
    id: i64,
    name: &str,
    slug: &str,
    image_url: &str,
    children: Vec<Category>,
) -> Category {
    Category {
        id,
        name: name.into(),
        slug: slug.into(),
        parent_id: None,
        image_url: Some(image_url.into()),
        children,
    }
}

fn brand(id: i64, name: &str, slug: &str) -> Brand {
    Brand {
        id,
        name: name.into(),
        slug: slug.into(),
        logo_url: None,
    }
}

fn image(id: i64, url: &str, alt_text: &str) -> ProductImage {
    ProductImage {
        id,
        url: url.into(),
        alt_text: Some(alt_text.into()),
    }
}

fn option(id: i64, title: &str, value: &str) -> VariantOption {
    VariantOption {
        id,
        title: title.into(),
        value: value.into(),
    }
}

pub fn demo_categories() -> Vec<Category> {
    vec![
        root_category(
            1,
            "Elektronik",
            "elektronik",
            "https://images.unsplash.com/photo-1498049794561-7780e7231661?w=400",
            vec![
                category(11, "Telefon", "telefon", Some(1)),
                category(12, "Bilgisayar", "bilgisayar", Some(1)),
                category(13, "Televizyon", "televizyon", Some(1)),
                category(14, "Kulaklık", "kulaklik", Some(1)),
            ],
        ),
        root_category(
            2,
            "Moda",
            "moda",
            "https://images.unsplash.com/photo-1445205170230-053b83016050?w=400",
            vec![
                category(21, "Kadın", "kadin", Some(2)),
                category(22, "Erkek", "erkek", Some(2)),
                category(23, "Çocuk", "cocuk", Some(2)),
            ],
        ),
        root_category(
            3,
            "Ev & Yaşam",
            "ev-yasam",
            "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136?w=400",
            vec![
                category(31, "Mobilya", "mobilya", Some(3)),
                category(32, "Dekorasyon", "dekorasyon", Some(3)),
                category(33, "Mutfak", "mutfak", Some(3)),
            ],
        ),
        root_category(
            4,
            "Kozmetik",
            "kozmetik",
            "https://images.unsplash.com/photo-1596462502278-27bfdc403348?w=400",
            vec![
                category(41, "Makyaj", "makyaj", Some(4)),
                category(42, "Cilt Bakımı", "cilt-bakimi", Some(4)),
                category(43, "Parfüm", "parfum", Some(4)),
            ],
        ),
        root_category(
            5,
            "Spor",
            "spor",
            "https://images.unsplash.com/photo-1517836357463-d25dfeac3438?w=400",
            vec![
                category(51, "Spor Giyim", "spor-giyim", Some(5)),
                category(52, "Spor Ayakkabı", "spor-ayakkabi", Some(5)),
                category(53, "Fitness", "fitness", Some(5)),
            ],
        ),
        root_category(
            6,
            "Kitap & Hobi",
            "kitap-hobi",
            "https://images.unsplash.com/photo-1512820790803-83ca734da794?w=400",
            vec![
                category(61, "Kitap", "kitap", Some(6)),
                category(62, "Müzik Aletleri", "muzik-aletleri", Some(6)),
            ],
        ),
    ]
}

pub fn demo_brands() -> Vec<Brand> {
    vec![
        brand(1, "Apple", "apple"),
        brand(2, "Samsung", "samsung"),
        brand(3, "Nike", "nike"),
        brand(4, "Adidas", "adidas"),
        brand(5, "Sony", "sony"),
        brand(6, "LG", "lg"),
        brand(7, "Zara", "zara"),
        brand(8, "H&M", "hm"),
    ]
}

pub fn demo_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "iPhone 15 Pro Max 256GB".into(),
            slug: "iphone-15-pro-max-256gb".into(),
            description: Some(
                "Apple iPhone 15 Pro Max, A17 Pro çip, 48MP kamera sistemi, Titanium tasarım. \
                 En güçlü iPhone deneyimi."
                    .into(),
            ),
            brand_id: Some(1),
            brand_name: Some("Apple".into()),
            category_id: 11,
            category_name: "Telefon".into(),
            rating: 4.8,
            review_count: 1250,
            created_at: 1_705_312_800_000, // 2024-01-15T10:00:00Z
            status: ProductStatus::Active,
            variants: vec![
                ProductVariant {
                    id: 101,
                    price: 74999.0,
                    original_price: Some(79999.0),
                    stock: 50,
                    barcode: "APL15PM256BLK".into(),
                    sku: "IPH15PM-256-BLK".into(),
                    thumbnails: vec![
                        image(
                            1,
                            "https://images.unsplash.com/photo-1695048133142-1a20484d2569?w=800",
                            "iPhone 15 Pro Max",
                        ),
                        image(
                            2,
                            "https://images.unsplash.com/photo-1510557880182-3d4d3cba35a5?w=800",
                            "iPhone Back",
                        ),
                    ],
                    options: vec![option(1, "Renk", "Siyah Titanyum")],
                },
                ProductVariant {
                    id: 102,
                    price: 74999.0,
                    original_price: Some(79999.0),
                    stock: 35,
                    barcode: "APL15PM256WHT".into(),
                    sku: "IPH15PM-256-WHT".into(),
                    thumbnails: vec![image(
                        3,
                        "https://images.unsplash.com/photo-1592750475338-74b7b21085ab?w=800",
                        "iPhone 15 Pro Max White",
                    )],
                    options: vec![option(2, "Renk", "Beyaz Titanyum")],
                },
            ],
        },
        Product {
            id: 2,
            name: "Samsung Galaxy S24 Ultra 512GB".into(),
            slug: "samsung-galaxy-s24-ultra-512gb".into(),
            description: Some(
                "Samsung Galaxy S24 Ultra, Galaxy AI ile donatılmış, S Pen dahil, 200MP kamera."
                    .into(),
            ),
            brand_id: Some(2),
            brand_name: Some("Samsung".into()),
            category_id: 11,
            category_name: "Telefon".into(),
            rating: 4.7,
            review_count: 890,
            created_at: 1_706_781_600_000, // 2024-02-01T10:00:00Z
            status: ProductStatus::Active,
            variants: vec![ProductVariant {
                id: 201,
                price: 69999.0,
                original_price: Some(74999.0),
                stock: 40,
                barcode: "SMS24U512BLK".into(),
                sku: "GS24U-512-BLK".into(),
                thumbnails: vec![image(
                    4,
                    "https://images.unsplash.com/photo-1610945415295-d9bbf067e59c?w=800",
                    "Galaxy S24 Ultra",
                )],
                options: vec![option(3, "Renk", "Titanium Black")],
            }],
        },
        Product {
            id: 3,
            name: "Nike Air Max 270".into(),
            slug: "nike-air-max-270".into(),
            description: Some(
                "Nike Air Max 270, maksimum konfor için Air yastıklama teknolojisi. \
                 Günlük kullanım için ideal."
                    .into(),
            ),
            brand_id: Some(3),
            brand_name: Some("Nike".into()),
            category_id: 52,
            category_name: "Spor Ayakkabı".into(),
            rating: 4.6,
            review_count: 2340,
            created_at: 1_705_744_800_000, // 2024-01-20T10:00:00Z
            status: ProductStatus::Active,
            variants: vec![
                ProductVariant {
                    id: 301,
                    price: 3299.0,
                    original_price: Some(3999.0),
                    stock: 100,
                    barcode: "NKA270BLK42".into(),
                    sku: "AM270-BLK-42".into(),
                    thumbnails: vec![image(
                        5,
                        "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=800",
                        "Nike Air Max 270",
                    )],
                    options: vec![option(4, "Renk", "Siyah"), option(5, "Numara", "42")],
                },
                ProductVariant {
                    id: 302,
                    price: 3299.0,
                    original_price: Some(3999.0),
                    stock: 80,
                    barcode: "NKA270WHT42".into(),
                    sku: "AM270-WHT-42".into(),
                    thumbnails: vec![image(
                        6,
                        "https://images.unsplash.com/photo-1549298916-b41d501d3772?w=800",
                        "Nike Air Max 270 White",
                    )],
                    options: vec![option(6, "Renk", "Beyaz"), option(7, "Numara", "42")],
                },
            ],
        },
        Product {
            id: 4,
            name: "Sony WH-1000XM5 Kablosuz Kulaklık".into(),
            slug: "sony-wh-1000xm5-kablosuz-kulaklik".into(),
            description: Some(
                "Sony WH-1000XM5, sınıfının en iyi gürültü engelleme özelliği. 30 saat pil ömrü."
                    .into(),
            ),
            brand_id: Some(5),
            brand_name: Some("Sony".into()),
            category_id: 14,
            category_name: "Kulaklık".into(),
            rating: 4.9,
            review_count: 567,
            created_at: 1_706_176_800_000, // 2024-01-25T10:00:00Z
            status: ProductStatus::Active,
            variants: vec![
                ProductVariant {
                    id: 401,
                    price: 9499.0,
                    original_price: Some(11999.0),
                    stock: 25,
                    barcode: "SNYWH1000XM5BLK".into(),
                    sku: "WH1000XM5-BLK".into(),
                    thumbnails: vec![image(
                        7,
                        "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=800",
                        "Sony WH-1000XM5",
                    )],
                    options: vec![option(8, "Renk", "Siyah")],
                },
                ProductVariant {
                    id: 402,
                    price: 9499.0,
                    original_price: Some(11999.0),
                    stock: 15,
                    barcode: "SNYWH1000XM5SLV".into(),
                    sku: "WH1000XM5-SLV".into(),
                    thumbnails: vec![image(
                        8,
                        "https://images.unsplash.com/photo-1484704849700-f032a568e944?w=800",
                        "Sony WH-1000XM5 Silver",
                    )],
                    options: vec![option(9, "Renk", "Gümüş")],
                },
            ],
        },
        Product {
            id: 5,
            name: "MacBook Pro 14\" M3 Pro".into(),
            slug: "macbook-pro-14-m3-pro".into(),
            description: Some(
                "Apple MacBook Pro 14 inç, M3 Pro çip, 18GB RAM, 512GB SSD. \
                 Profesyoneller için tasarlandı."
                    .into(),
            ),
            brand_id: Some(1),
            brand_name: Some("Apple".into()),
            category_id: 12,
            category_name: "Bilgisayar".into(),
            rating: 4.9,
            review_count: 423,
            created_at: 1_707_559_200_000, // 2024-02-10T10:00:00Z
            status: ProductStatus::Active,
            variants: vec![ProductVariant {
                id: 501,
                price: 89999.0,
                original_price: Some(94999.0),
                stock: 20,
                barcode: "MBPM3P14512SG".into(),
                sku: "MBP14-M3P-512-SG".into(),
                thumbnails: vec![image(
                    9,
                    "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?w=800",
                    "MacBook Pro",
                )],
                options: vec![option(10, "Renk", "Uzay Grisi")],
            }],
        },
        Product {
            id: 6,
            name: "Adidas Ultraboost 22".into(),
            slug: "adidas-ultraboost-22".into(),
            description: Some(
                "Adidas Ultraboost 22, enerji geri dönüşümlü BOOST orta taban. Koşu için mükemmel."
                    .into(),
            ),
            brand_id: Some(4),
            brand_name: Some("Adidas".into()),
            category_id: 52,
            category_name: "Spor Ayakkabı".into(),
            rating: 4.5,
            review_count: 1890,
            created_at: 1_705_572_000_000, // 2024-01-18T10:00:00Z
            status: ProductStatus::Active,
            variants: vec![ProductVariant {
                id: 601,
                price: 3899.0,
                original_price: Some(4499.0),
                stock: 75,
                barcode: "ADUB22BLK43".into(),
                sku: "UB22-BLK-43".into(),
                thumbnails: vec![image(
                    10,
                    "https://images.unsplash.com/photo-1608231387042-66d1773070a5?w=800",
                    "Adidas Ultraboost",
                )],
                options: vec![option(11, "Renk", "Siyah"), option(12, "Numara", "43")],
            }],
        },
        Product {
            id: 7,
            name: "LG 55\" OLED 4K Smart TV".into(),
            slug: "lg-55-oled-4k-smart-tv".into(),
            description: Some(
                "LG OLED55C3 serisi, sonsuz kontrast oranı, Dolby Vision & Atmos desteği.".into(),
            ),
            brand_id: Some(6),
            brand_name: Some("LG".into()),
            category_id: 13,
            category_name: "Televizyon".into(),
            rating: 4.8,
            review_count: 312,
            created_at: 1_707_127_200_000, // 2024-02-05T10:00:00Z
            status: ProductStatus::Active,
            variants: vec![ProductVariant {
                id: 701,
                price: 42999.0,
                original_price: Some(49999.0),
                stock: 15,
                barcode: "LGOLED55C3".into(),
                sku: "OLED55C3-2024".into(),
                thumbnails: vec![image(
                    11,
                    "https://images.unsplash.com/photo-1593359677879-a4bb92f829d1?w=800",
                    "LG OLED TV",
                )],
                options: vec![option(13, "Boyut", "55 inç")],
            }],
        },
        Product {
            id: 8,
            name: "Zara Oversize Blazer Ceket".into(),
            slug: "zara-oversize-blazer-ceket".into(),
            description: Some(
                "Zara koleksiyonundan şık oversize blazer ceket. Premium kumaş kalitesi.".into(),
            ),
            brand_id: Some(7),
            brand_name: Some("Zara".into()),
            category_id: 21,
            category_name: "Kadın".into(),
            rating: 4.3,
            review_count: 178,
            created_at: 1_707_386_400_000, // 2024-02-08T10:00:00Z
            status: ProductStatus::Active,
            variants: vec![
                ProductVariant {
                    id: 801,
                    price: 1299.0,
                    original_price: Some(1799.0),
                    stock: 45,
                    barcode: "ZRBLZRBLKS".into(),
                    sku: "ZR-BLZ-BLK-S".into(),
                    thumbnails: vec![image(
                        12,
                        "https://images.unsplash.com/photo-1591047139829-d91aecb6caea?w=800",
                        "Zara Blazer",
                    )],
                    options: vec![option(14, "Renk", "Siyah"), option(15, "Beden", "S")],
                },
                ProductVariant {
                    id: 802,
                    price: 1299.0,
                    original_price: Some(1799.0),
                    stock: 40,
                    barcode: "ZRBLZRBLKM".into(),
                    sku: "ZR-BLZ-BLK-M".into(),
                    thumbnails: vec![image(
                        12,
                        "https://images.unsplash.com/photo-1591047139829-d91aecb6caea?w=800",
                        "Zara Blazer",
                    )],
                    options: vec![option(14, "Renk", "Siyah"), option(16, "Beden", "M")],
                },
            ],
        },
    ]
}

/// The full demo dataset
pub fn demo_catalog() -> CatalogData {
    CatalogData {
        products: demo_products(),
        categories: demo_categories(),
        brands: demo_brands(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_shape() {
        let data = demo_catalog();
        assert_eq!(data.products.len(), 8);
        assert_eq!(data.categories.len(), 6);
        assert_eq!(data.brands.len(), 8);
    }

    #[test]
    fn test_fixture_review_counts() {
        let counts: Vec<u32> = demo_products().iter().map(|p| p.review_count).collect();
        assert_eq!(counts, vec![1250, 890, 2340, 567, 423, 1890, 312, 178]);
    }

    #[test]
    fn test_every_variant_is_discounted_fixture() {
        // The demo data models a sale: every variant carries an
        // original_price strictly above the current price
        for product in demo_products() {
            for variant in product.variants {
                assert!(variant.has_discount(), "variant {} in {}", variant.id, product.slug);
            }
        }
    }

    #[test]
    fn test_category_parent_references() {
        for root in demo_categories() {
            assert!(root.is_root());
            for child in &root.children {
                assert_eq!(child.parent_id, Some(root.id));
            }
        }
    }
}
