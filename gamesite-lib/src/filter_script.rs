//! The canonical category filter / "load more" script for the index page.

const PAGE_SIZE_PLACEHOLDER: &str = "__PAGE_SIZE__";

const TEMPLATE: &str = r#"
    document.addEventListener('DOMContentLoaded', function() {
      const categoryLinks = document.querySelectorAll('.category-link');
      const allGameCards = document.querySelectorAll('#games-container > div.bg-game-card');
      const pageSize = __PAGE_SIZE__;

      categoryLinks.forEach(link => {
        link.addEventListener('click', function(e) {
          e.preventDefault();

          categoryLinks.forEach(l => {
            l.classList.remove('text-game-accent');
            l.classList.remove('font-bold');
          });
          this.classList.add('text-game-accent');
          this.classList.add('font-bold');

          const selectedCategory = this.getAttribute('data-category');

          // Show the first page of matching cards, hide the rest
          let visibleCount = 0;
          allGameCards.forEach(card => {
            const cardCategory = card.getAttribute('data-category');
            if (selectedCategory === 'all-games' || cardCategory === selectedCategory) {
              if (visibleCount < pageSize) {
                card.style.display = '';
                visibleCount++;
              } else {
                card.style.display = 'none';
              }
            } else {
              card.style.display = 'none';
            }
          });

          const loadMoreBtn = document.getElementById('loadMoreBtn');
          if (loadMoreBtn) {
            const hiddenCount = Array.from(allGameCards).filter(card => {
              if (selectedCategory === 'all-games') {
                return card.style.display === 'none';
              }
              return card.getAttribute('data-category') === selectedCategory && card.style.display === 'none';
            }).length;
            loadMoreBtn.style.display = hiddenCount > 0 ? '' : 'none';
          }
        });
      });

      const loadMoreBtn = document.getElementById('loadMoreBtn');
      if (loadMoreBtn) {
        loadMoreBtn.addEventListener('click', function() {
          const activeLink = document.querySelector('.category-link.text-game-accent');
          const visibleCategory = activeLink ? activeLink.dataset.category : 'all-games';

          // Reveal the next page of hidden cards in the active category
          let moreCount = 0;
          allGameCards.forEach(card => {
            if (card.style.display === 'none') {
              const cardCategory = card.dataset.category;
              if (visibleCategory === 'all-games' || cardCategory === visibleCategory) {
                if (moreCount < pageSize) {
                  card.style.display = '';
                  moreCount++;
                }
              }
            }
          });

          const remainingHidden = Array.from(allGameCards).filter(card => {
            const cardCategory = card.dataset.category;
            return card.style.display === 'none' &&
                  (visibleCategory === 'all-games' || cardCategory === visibleCategory);
          }).length;
          if (remainingHidden === 0) {
            this.style.display = 'none';
          }
        });
      }

      const allGamesLink = document.querySelector('.category-link[data-category="all-games"]');
      if (allGamesLink) {
        allGamesLink.click();
      }
    });
    "#;

/// Script body for the given page size.
pub fn filter_script_body(page_size: usize) -> String {
    TEMPLATE.replace(PAGE_SIZE_PLACEHOLDER, &page_size.to_string())
}
