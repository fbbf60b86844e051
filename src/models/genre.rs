use serde::{Deserialize, Serialize};

/// 电影类型（后端可识别的固定枚举）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MovieGenre {
    Action,
    Adventure,
    Animation,
    Biography,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Family,
    Fantasy,
    #[serde(rename = "Film-Noir")]
    FilmNoir,
    History,
    Horror,
    Music,
    Musical,
    Mystery,
    Romance,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Short,
    Sport,
    Thriller,
    War,
    Western,
}

impl MovieGenre {
    /// 全部类型，按下拉框展示顺序排列
    pub const ALL: [MovieGenre; 23] = [
        MovieGenre::Action,
        MovieGenre::Adventure,
        MovieGenre::Animation,
        MovieGenre::Biography,
        MovieGenre::Comedy,
        MovieGenre::Crime,
        MovieGenre::Documentary,
        MovieGenre::Drama,
        MovieGenre::Family,
        MovieGenre::Fantasy,
        MovieGenre::FilmNoir,
        MovieGenre::History,
        MovieGenre::Horror,
        MovieGenre::Music,
        MovieGenre::Musical,
        MovieGenre::Mystery,
        MovieGenre::Romance,
        MovieGenre::SciFi,
        MovieGenre::Short,
        MovieGenre::Sport,
        MovieGenre::Thriller,
        MovieGenre::War,
        MovieGenre::Western,
    ];

    /// 发送给后端的查询值
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieGenre::Action => "Action",
            MovieGenre::Adventure => "Adventure",
            MovieGenre::Animation => "Animation",
            MovieGenre::Biography => "Biography",
            MovieGenre::Comedy => "Comedy",
            MovieGenre::Crime => "Crime",
            MovieGenre::Documentary => "Documentary",
            MovieGenre::Drama => "Drama",
            MovieGenre::Family => "Family",
            MovieGenre::Fantasy => "Fantasy",
            MovieGenre::FilmNoir => "Film-Noir",
            MovieGenre::History => "History",
            MovieGenre::Horror => "Horror",
            MovieGenre::Music => "Music",
            MovieGenre::Musical => "Musical",
            MovieGenre::Mystery => "Mystery",
            MovieGenre::Romance => "Romance",
            MovieGenre::SciFi => "Sci-Fi",
            MovieGenre::Short => "Short",
            MovieGenre::Sport => "Sport",
            MovieGenre::Thriller => "Thriller",
            MovieGenre::War => "War",
            MovieGenre::Western => "Western",
        }
    }
}

impl std::fmt::Display for MovieGenre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MovieGenre {
    type Err = String;

    // 大小写不敏感，方便命令行输入
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MovieGenre::ALL
            .iter()
            .copied()
            .find(|genre| genre.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid movie genre: {}", s))
    }
}
